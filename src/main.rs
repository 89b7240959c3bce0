//! Poker Table OCR
//!
//! Reads the opponent's and the user's bets and stacks plus the pot from the
//! screen of an online poker table, and writes them as "Label: value" lines
//! to a session log. Regions are found relative to the players' avatars;
//! text is read with Tesseract.

mod automation;
mod capture;
mod config;
mod error;
mod locate;
mod logging;
mod notes;
mod ocr;
mod paths;
mod pipeline;

use anyhow::Result;
use tracing::{error, info};

use crate::capture::Desktop;
use crate::config::TableConfig;
use crate::error::ExtractError;
use crate::locate::TemplateLocator;
use crate::ocr::{ensure_tesseract, Tesseract};
use crate::pipeline::{Anchors, Session};

fn main() -> Result<()> {
    paths::ensure_directories()?;
    logging::init_logging(&paths::get_logs_dir())?;

    let config = config::load_config(&paths::get_config_path());

    match run(&config) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Run failed: {:#}", e);
            Err(e)
        }
    }
}

fn run(config: &TableConfig) -> Result<()> {
    let languages = config.required_languages();
    let tesseract = ensure_tesseract(
        config.tesseract_path.as_deref(),
        &languages,
        config.download_languages,
    )
    .map_err(|e| ExtractError::ExtractionFailed(format!("{:#}", e)))?;
    let ocr = Tesseract::new(tesseract, config.page_segmentation);

    let anchors = Anchors::load(config)?;
    let mut sink = notes::sink_from_config(config);

    info!("Starting extraction ({:?} sink)", config.sink);
    let reading = Session {
        config,
        anchors: &anchors,
        screen: &Desktop,
        locator: &TemplateLocator,
        ocr: &ocr,
        sink: sink.as_mut(),
    }
    .run()?;

    info!(
        "Done: opponent bet {:?}, my bet {:?}, opponent stack {:?}, my stack {:?}, bank {:?} -> {}",
        reading.opponent_bet,
        reading.user_bet,
        reading.opponent_stack,
        reading.user_stack,
        reading.bank,
        config.note_path.display()
    );

    Ok(())
}
