//! Screen capture and the grayscale copy used for whole-table OCR.

pub mod grayscale;
pub mod screen;

pub use grayscale::to_grayscale;

use anyhow::Result;
use image::{ImageBuffer, Rgba};

/// Source of full-screen frames.
pub trait ScreenSource {
    fn capture(&self) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>>;
}

/// The live primary monitor.
#[derive(Debug, Default, Clone, Copy)]
pub struct Desktop;

impl ScreenSource for Desktop {
    fn capture(&self) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
        screen::capture_primary_screen()
    }
}
