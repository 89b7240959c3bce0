//! Log sink writing the note file directly.
//!
//! Opens the file in append mode for each line, so lines written before a
//! failure are already on disk.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use super::NoteSink;

pub struct FileNote {
    path: PathBuf,
}

impl FileNote {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl NoteSink for FileNote {
    fn recreate(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        Ok(())
    }

    fn append_line(&mut self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .context("Failed to open note for append")?;

        writeln!(file, "{}", text).context("Failed to write note line")?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        // Every line is flushed by its own append
        Ok(())
    }
}
