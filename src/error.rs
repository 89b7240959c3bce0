//! Typed failures of the extraction pipeline.
//!
//! Everything else (I/O, image decoding, config) travels as `anyhow::Error`.

use thiserror::Error;

use crate::locate::Rect;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The anchor image could not be found on the captured frame.
    #[error("anchor '{anchor}' not found on screen (best match error {score:.4})")]
    AnchorNotFound { anchor: String, score: f32 },

    /// Tesseract could not be invoked or exited unsuccessfully.
    #[error("text extraction failed: {0}")]
    ExtractionFailed(String),

    /// The bank label pattern is absent from the OCR text.
    #[error("label '{label}:' not found in OCR text")]
    LabelNotFound { label: String },

    /// The bank label was found but no digits follow it.
    #[error("no digits after label '{label}:'")]
    ValueMissing { label: String },

    /// The computed region lies entirely outside the captured frame.
    #[error("region {rect} has no pixels inside the {width}x{height} frame")]
    EmptyRegion { rect: Rect, width: u32, height: u32 },
}
