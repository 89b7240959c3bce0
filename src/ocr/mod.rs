pub mod engine;
pub mod normalize;
pub mod setup;

pub use engine::{Tesseract, TextRecognizer};
pub use normalize::{normalize_bank, normalize_bet, normalize_stack};
pub use setup::{ensure_tesseract, DEFAULT_LANGUAGE};
