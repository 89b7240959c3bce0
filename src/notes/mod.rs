//! Session log sinks.
//!
//! The pipeline only sees [`NoteSink`]; whether lines reach the file
//! directly or through an editor window driven by keystrokes is decided at
//! startup from the config.

pub mod file;
pub mod keystroke;

pub use file::FileNote;
pub use keystroke::KeystrokeNote;

use anyhow::Result;
use std::time::Duration;

use crate::config::{SinkKind, TableConfig};

/// Destination of the "Label: value" lines of one run.
pub trait NoteSink {
    /// Starts an empty log, discarding the previous run's file.
    fn recreate(&mut self) -> Result<()>;

    /// Appends `text` followed by a newline.
    fn append_line(&mut self, text: &str) -> Result<()>;

    /// Persists the log. Called once at the end of every run, failed runs
    /// included.
    fn save(&mut self) -> Result<()>;

    /// True when the sink switches windows and needs the grayscale
    /// screenshot open as the window it returns to.
    fn needs_viewer(&self) -> bool {
        false
    }
}

/// Builds the sink selected in the config.
pub fn sink_from_config(config: &TableConfig) -> Box<dyn NoteSink> {
    match config.sink {
        SinkKind::File => Box::new(FileNote::new(config.note_path.clone())),
        SinkKind::Keystroke => Box::new(KeystrokeNote::new(
            config.note_path.clone(),
            Duration::from_millis(config.keystroke_interval_ms),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_selection() {
        let config = TableConfig::default();
        assert!(!sink_from_config(&config).needs_viewer());

        let config = TableConfig {
            sink: SinkKind::Keystroke,
            ..TableConfig::default()
        };
        assert!(sink_from_config(&config).needs_viewer());
    }
}
