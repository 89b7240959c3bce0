use image::{ImageBuffer, Rgba};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExtractError;

/// Top-left corner of a detected anchor, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A screen rectangle as two corners: (x1, y1) inclusive, (x2, y2) exclusive.
///
/// Coordinates are signed because offset rules can point above or left of
/// the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Expansion vector turning an anchor point into a rectangle.
///
/// Calibrated against one table layout and resolution; it does not scale
/// with the anchor or the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetRule {
    pub dx1: i32,
    pub dy1: i32,
    pub dx2: i32,
    pub dy2: i32,
}

impl OffsetRule {
    pub const fn new(dx1: i32, dy1: i32, dx2: i32, dy2: i32) -> Self {
        Self { dx1, dy1, dx2, dy2 }
    }

    /// Duplicates the point into (x, y, x, y) and adds the rule elementwise.
    pub fn apply(&self, at: Point) -> Rect {
        Rect {
            x1: at.x + self.dx1,
            y1: at.y + self.dy1,
            x2: at.x + self.dx2,
            y2: at.y + self.dy2,
        }
    }
}

/// The four calibrated offset rules, one per player-relative value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetRules {
    pub stack_opponent: OffsetRule,
    pub stack_user: OffsetRule,
    pub bet_opponent: OffsetRule,
    pub bet_user: OffsetRule,
}

impl Default for OffsetRules {
    fn default() -> Self {
        Self {
            stack_opponent: OffsetRule::new(-100, 0, 0, 60),
            stack_user: OffsetRule::new(0, 0, 200, 60),
            bet_opponent: OffsetRule::new(50, 70, 130, 100),
            bet_user: OffsetRule::new(50, -100, 200, -60),
        }
    }
}

/// Crops a rectangle out of a frame.
///
/// The rectangle is clamped to the frame bounds; a rectangle with no pixels
/// left after clamping is an error since OCR has nothing to read.
pub fn crop_rect(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    rect: Rect,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>, ExtractError> {
    let (w, h) = img.dimensions();

    let x0 = rect.x1.clamp(0, w as i32) as u32;
    let y0 = rect.y1.clamp(0, h as i32) as u32;
    let x1 = rect.x2.clamp(0, w as i32) as u32;
    let y1 = rect.y2.clamp(0, h as i32) as u32;

    if x1 <= x0 || y1 <= y0 {
        return Err(ExtractError::EmptyRegion {
            rect,
            width: w,
            height: h,
        });
    }

    Ok(image::imageops::crop_imm(img, x0, y0, x1 - x0, y1 - y0).to_image())
}
