//! Anchor images and the search that finds them on a captured frame.

use anyhow::{Context, Result};
use image::{GrayImage, ImageBuffer, Rgba};
use imageproc::template_matching::{
    find_extremes, match_template_parallel, MatchTemplateMethod,
};
use std::path::Path;
use tracing::debug;

use crate::error::ExtractError;

use super::region::Point;

/// Highest normalized squared error still accepted as a match.
///
/// 0.0 is a pixel-exact match; the slack absorbs scaling/compression noise
/// between the saved avatar and the live table.
const MATCH_TOLERANCE: f32 = 0.05;

/// A reference bitmap of a recognizable on-screen element (a player's avatar).
#[derive(Debug, Clone)]
pub struct Anchor {
    pub name: String,
    pub image: GrayImage,
}

impl Anchor {
    /// Loads an anchor image from disk. Matching runs on grayscale, so the
    /// bitmap is converted once here.
    pub fn load(name: &str, path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Failed to load anchor '{}' from {}", name, path.display()))?
            .to_luma8();

        Ok(Self {
            name: name.to_string(),
            image,
        })
    }
}

/// Finds where an anchor sits on a frame.
pub trait AnchorLocator {
    /// Returns the top-left corner of the best match, or `AnchorNotFound`.
    fn find(
        &self,
        frame: &ImageBuffer<Rgba<u8>, Vec<u8>>,
        anchor: &Anchor,
    ) -> Result<Point, ExtractError>;
}

/// Template-matching locator: slides the anchor over the frame and keeps
/// the position with the lowest normalized squared error.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateLocator;

impl AnchorLocator for TemplateLocator {
    fn find(
        &self,
        frame: &ImageBuffer<Rgba<u8>, Vec<u8>>,
        anchor: &Anchor,
    ) -> Result<Point, ExtractError> {
        let (fw, fh) = frame.dimensions();
        let (aw, ah) = anchor.image.dimensions();

        if aw == 0 || ah == 0 || aw > fw || ah > fh {
            return Err(ExtractError::AnchorNotFound {
                anchor: anchor.name.clone(),
                score: f32::INFINITY,
            });
        }

        let gray = image::imageops::grayscale(frame);
        let scores = match_template_parallel(
            &gray,
            &anchor.image,
            MatchTemplateMethod::SumOfSquaredErrorsNormalized,
        );
        let extremes = find_extremes(&scores);
        let score = extremes.min_value;

        debug!(
            "Anchor '{}': best error {:.4} at {:?}",
            anchor.name, score, extremes.min_value_location
        );

        // NaN (all-black window) never counts as a match
        if !(score <= MATCH_TOLERANCE) {
            return Err(ExtractError::AnchorNotFound {
                anchor: anchor.name.clone(),
                score,
            });
        }

        let (x, y) = extremes.min_value_location;
        Ok(Point {
            x: x as i32,
            y: y as i32,
        })
    }
}
