//! Log sink that types into a text editor window.
//!
//! The editor is expected to be the second most recently used window, so a
//! single Alt+Tab reaches it and another one comes back. Nothing verifies
//! that focus actually landed on the editor.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::automation::{press_hotkey, type_text, Key, Keyboard, SystemKeyboard};

use super::NoteSink;

pub struct KeystrokeNote<K: Keyboard = SystemKeyboard> {
    path: PathBuf,
    interval: Duration,
    keyboard: K,
    /// Set once the editor document exists; until then there is nothing to
    /// save and no window to switch to.
    created: bool,
}

impl KeystrokeNote {
    pub fn new(path: PathBuf, interval: Duration) -> Self {
        Self::with_keyboard(path, interval, SystemKeyboard)
    }
}

impl<K: Keyboard> KeystrokeNote<K> {
    pub fn with_keyboard(path: PathBuf, interval: Duration, keyboard: K) -> Self {
        Self {
            path,
            interval,
            keyboard,
            created: false,
        }
    }

    fn switch_window(&mut self) -> Result<()> {
        press_hotkey(&mut self.keyboard, &[Key::Alt, Key::Tab])
    }
}

impl<K: Keyboard> NoteSink for KeystrokeNote<K> {
    /// Deletes the old file, then creates and names a new document in the
    /// focused editor (Ctrl+N, Ctrl+S, file name, Enter).
    fn recreate(&mut self) -> Result<()> {
        self.created = false;
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }

        let name = self.path.to_string_lossy().into_owned();
        press_hotkey(&mut self.keyboard, &[Key::Control, Key::Letter('n')])?;
        press_hotkey(&mut self.keyboard, &[Key::Control, Key::Letter('s')])?;
        type_text(&mut self.keyboard, &name, self.interval)?;
        press_hotkey(&mut self.keyboard, &[Key::Enter])?;

        self.created = true;
        debug!("Editor note created as {}", self.path.display());
        Ok(())
    }

    fn append_line(&mut self, text: &str) -> Result<()> {
        self.switch_window()?;
        type_text(&mut self.keyboard, &format!("{}\n", text), self.interval)?;
        self.switch_window()
    }

    fn save(&mut self) -> Result<()> {
        if !self.created {
            debug!("No editor note was created, skipping save");
            return Ok(());
        }
        self.switch_window()?;
        press_hotkey(&mut self.keyboard, &[Key::Control, Key::Letter('s')])
    }

    fn needs_viewer(&self) -> bool {
        true
    }
}
