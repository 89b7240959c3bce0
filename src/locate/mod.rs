//! Region location relative to anchor images.
//!
//! An anchor (player avatar) is searched on the frame, and a calibrated
//! offset rule expands its top-left corner into the rectangle holding the
//! value to read.

pub mod anchor;
pub mod region;

pub use anchor::{Anchor, AnchorLocator, TemplateLocator};
pub use region::{crop_rect, OffsetRule, OffsetRules, Rect};

use image::{ImageBuffer, Rgba};
use tracing::debug;

use crate::error::ExtractError;

/// Finds `anchor` on `frame` and applies `rule` to its top-left corner.
///
/// Only the best match is considered; a missing anchor is propagated as
/// `AnchorNotFound`.
pub fn locate(
    locator: &dyn AnchorLocator,
    frame: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    anchor: &Anchor,
    rule: &OffsetRule,
) -> Result<Rect, ExtractError> {
    let at = locator.find(frame, anchor)?;
    let rect = rule.apply(at);

    debug!(
        "Anchor '{}' at ({}, {}) -> region {}",
        anchor.name, at.x, at.y, rect
    );

    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::region::Point;
    use image::GrayImage;

    struct FixedLocator(Option<Point>);

    impl AnchorLocator for FixedLocator {
        fn find(
            &self,
            _frame: &ImageBuffer<Rgba<u8>, Vec<u8>>,
            anchor: &Anchor,
        ) -> Result<Point, ExtractError> {
            self.0.ok_or_else(|| ExtractError::AnchorNotFound {
                anchor: anchor.name.clone(),
                score: 1.0,
            })
        }
    }

    fn anchor() -> Anchor {
        Anchor {
            name: "user".to_string(),
            image: GrayImage::new(2, 2),
        }
    }

    #[test]
    fn test_locate_applies_rule_to_found_point() {
        let frame = ImageBuffer::new(10, 10);
        let locator = FixedLocator(Some(Point { x: 100, y: 200 }));
        let rules = OffsetRules::default();

        let rect = locate(&locator, &frame, &anchor(), &rules.stack_user).unwrap();
        assert_eq!(rect, Rect { x1: 100, y1: 200, x2: 300, y2: 260 });
    }

    #[test]
    fn test_locate_propagates_not_found() {
        let frame = ImageBuffer::new(10, 10);
        let locator = FixedLocator(None);
        let rules = OffsetRules::default();

        let err = locate(&locator, &frame, &anchor(), &rules.bet_user).unwrap_err();
        assert!(matches!(err, ExtractError::AnchorNotFound { .. }));
    }
}
