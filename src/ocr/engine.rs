use image::DynamicImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ExtractError;

use super::setup::TesseractPaths;

/// Turns an image (a crop or a whole screenshot) into raw text.
pub trait TextRecognizer {
    /// `language` selects an OCR language profile (e.g. `rus`); `None` uses
    /// the engine default. The text is returned as read, misreads included.
    fn extract_text(
        &self,
        img: &DynamicImage,
        language: Option<&str>,
    ) -> Result<String, ExtractError>;
}

/// Tesseract driven through its command-line binary.
#[derive(Debug, Clone)]
pub struct Tesseract {
    executable: PathBuf,
    tessdata: Option<PathBuf>,
    page_segmentation: Option<u8>,
}

impl Tesseract {
    pub fn new(paths: TesseractPaths, page_segmentation: Option<u8>) -> Self {
        Self {
            executable: paths.executable,
            tessdata: paths.tessdata,
            page_segmentation,
        }
    }

    fn command(&self, input: &std::path::Path, language: Option<&str>) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg(input).arg("stdout");

        if let Some(dir) = &self.tessdata {
            cmd.arg("--tessdata-dir").arg(dir);
        }
        if let Some(lang) = language {
            cmd.arg("-l").arg(lang);
        }
        if let Some(psm) = self.page_segmentation {
            cmd.arg("--psm").arg(psm.to_string());
        }

        cmd
    }
}

impl TextRecognizer for Tesseract {
    fn extract_text(
        &self,
        img: &DynamicImage,
        language: Option<&str>,
    ) -> Result<String, ExtractError> {
        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")
            .map_err(|e| ExtractError::ExtractionFailed(format!("temp file: {}", e)))?;
        img.save(temp_input.path())
            .map_err(|e| ExtractError::ExtractionFailed(format!("writing OCR input: {}", e)))?;

        let output = self
            .command(temp_input.path(), language)
            .output()
            .map_err(|e| {
                ExtractError::ExtractionFailed(format!(
                    "could not run {}: {}",
                    self.executable.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::ExtractionFailed(format!(
                "Tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = strip_page_separator(&String::from_utf8_lossy(&output.stdout));
        debug!("OCR ({}): {:?}", language.unwrap_or("default"), text);

        Ok(text)
    }
}

/// Tesseract ends every page with a form feed.
fn strip_page_separator(text: &str) -> String {
    text.trim_end_matches('\u{c}').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(tessdata: Option<PathBuf>, psm: Option<u8>) -> Tesseract {
        Tesseract::new(
            TesseractPaths {
                executable: PathBuf::from("tesseract"),
                tessdata,
            },
            psm,
        )
    }

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_strip_page_separator() {
        assert_eq!(strip_page_separator("Банк: 4500\n\u{c}"), "Банк: 4500\n");
        assert_eq!(strip_page_separator("980\n"), "980\n");
    }

    #[test]
    fn test_command_without_language() {
        let cmd = engine(None, None).command(std::path::Path::new("in.png"), None);
        assert_eq!(args(&cmd), vec!["in.png", "stdout"]);
    }

    #[test]
    fn test_command_with_language_and_psm() {
        let cmd = engine(Some(PathBuf::from("data")), Some(7))
            .command(std::path::Path::new("in.png"), Some("rus"));
        assert_eq!(
            args(&cmd),
            vec!["in.png", "stdout", "--tessdata-dir", "data", "-l", "rus", "--psm", "7"]
        );
    }

    #[test]
    fn test_missing_binary_is_extraction_failure() {
        let engine = Tesseract::new(
            TesseractPaths {
                executable: PathBuf::from("definitely-not-a-tesseract-binary"),
                tessdata: None,
            },
            None,
        );
        let img = DynamicImage::new_luma8(4, 4);

        let err = engine.extract_text(&img, None).unwrap_err();
        assert!(matches!(err, ExtractError::ExtractionFailed(_)));
    }
}
