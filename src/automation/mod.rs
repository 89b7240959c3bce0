//! Desktop automation used by the keystroke log sink.
//!
//! This module provides:
//! - Keyboard input simulation (hotkeys and typed text)
//! - Opening files in the desktop's default viewer

pub mod keyboard;
pub mod viewer;

pub use keyboard::{press_hotkey, type_text, Key, Keyboard, SystemKeyboard};
pub use viewer::open_with_default_app;
