//! Run configuration.
//!
//! Loads settings from config.json at startup. Provides file locations,
//! offset rules, OCR language profiles and the log sink selection.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::locate::OffsetRules;

/// Where the session log lines go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// Write the log file directly.
    File,
    /// Drive a text editor window with simulated keystrokes.
    Keystroke,
}

/// Complete run configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Full-color screenshot written at the start of the run
    pub screenshot_path: PathBuf,
    /// Grayscale copy of the screenshot, used for the bank OCR pass
    pub gray_path: PathBuf,
    /// Session log ("Label: value" lines)
    pub note_path: PathBuf,
    /// Opponent avatar
    pub opponent_anchor_path: PathBuf,
    /// User avatar
    pub user_anchor_path: PathBuf,
    pub offsets: OffsetRules,
    /// Tesseract language for stack crops; `None` keeps the engine default
    pub stack_language: Option<String>,
    pub bet_language: Option<String>,
    pub bank_language: Option<String>,
    /// Word preceding the pot amount on the table
    pub bank_label: String,
    /// Explicit Tesseract binary; auto-detected when unset
    pub tesseract_path: Option<PathBuf>,
    /// Passed to Tesseract as `--psm`
    pub page_segmentation: Option<u8>,
    /// Fetch missing `*.traineddata` files from the tessdata repository
    pub download_languages: bool,
    pub sink: SinkKind,
    /// Delay between simulated keystrokes (milliseconds)
    pub keystroke_interval_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            screenshot_path: PathBuf::from("test.png"),
            gray_path: PathBuf::from("gray.png"),
            note_path: PathBuf::from("extracted_data.txt"),
            opponent_anchor_path: PathBuf::from("opponent_reference.png"),
            user_anchor_path: PathBuf::from("user_reference.png"),
            offsets: OffsetRules::default(),
            stack_language: None,
            bet_language: Some("rus".to_string()),
            bank_language: Some("rus".to_string()),
            bank_label: "Банк".to_string(),
            tesseract_path: None,
            page_segmentation: None,
            download_languages: true,
            sink: SinkKind::File,
            keystroke_interval_ms: 100,
        }
    }
}

impl TableConfig {
    /// Every language profile the run will ask Tesseract for.
    pub fn required_languages(&self) -> Vec<&str> {
        let mut langs = vec![crate::ocr::DEFAULT_LANGUAGE];
        for lang in [&self.stack_language, &self.bet_language, &self.bank_language]
            .into_iter()
            .flatten()
        {
            if !langs.contains(&lang.as_str()) {
                langs.push(lang.as_str());
            }
        }
        langs
    }
}

/// Loads configuration from `path` or returns defaults.
///
/// A missing or malformed file is not fatal; the reason is logged and the
/// defaults are used.
pub fn load_config(path: &Path) -> TableConfig {
    info!("Looking for config at: {}", path.display());

    if !path.exists() {
        info!("config.json not found. Using default config.");
        return TableConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => {
                info!("Config loaded from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to parse config.json: {}. Using defaults.", e);
                TableConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read config.json: {}. Using defaults.", e);
            TableConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::OffsetRule;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("config.json"));

        assert_eq!(config.note_path, PathBuf::from("extracted_data.txt"));
        assert_eq!(config.sink, SinkKind::File);
        assert_eq!(config.offsets.stack_user, OffsetRule::new(0, 0, 200, 60));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "sink": "keystroke",
                "bank_label": "Pot",
                "offsets": {
                    "stack_opponent": { "dx1": -90, "dy1": 0, "dx2": 0, "dy2": 50 },
                    "stack_user": { "dx1": 0, "dy1": 0, "dx2": 200, "dy2": 60 },
                    "bet_opponent": { "dx1": 50, "dy1": 70, "dx2": 130, "dy2": 100 },
                    "bet_user": { "dx1": 50, "dy1": -100, "dx2": 200, "dy2": -60 }
                }
            }"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.sink, SinkKind::Keystroke);
        assert_eq!(config.bank_label, "Pot");
        assert_eq!(config.offsets.stack_opponent, OffsetRule::new(-90, 0, 0, 50));
        assert_eq!(config.keystroke_interval_ms, 100);
        assert_eq!(config.bet_language.as_deref(), Some("rus"));
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let config = load_config(&path);
        assert_eq!(config.bank_label, "Банк");
    }

    #[test]
    fn test_required_languages_deduplicated() {
        let config = TableConfig::default();
        assert_eq!(config.required_languages(), vec!["eng", "rus"]);

        let config = TableConfig {
            stack_language: Some("eng".to_string()),
            bank_language: Some("ukr".to_string()),
            ..TableConfig::default()
        };
        assert_eq!(config.required_languages(), vec!["eng", "rus", "ukr"]);
    }
}
