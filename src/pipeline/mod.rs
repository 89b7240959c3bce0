//! One extraction run over the poker table.
//!
//! The sequence is fixed: recreate the log, snapshot the screen, read the
//! four player-relative values (opponent bet, user bet, opponent stack, user
//! stack), read the bank from the grayscale snapshot, save the log. Any
//! failure aborts the run; the log is saved on every exit path.

pub mod values;

pub use values::{Seat, TableReading, TrackedValue, ValueKind};

use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage};
use tracing::{info, warn};

use crate::automation::open_with_default_app;
use crate::capture::{to_grayscale, ScreenSource};
use crate::config::TableConfig;
use crate::locate::{crop_rect, locate, Anchor, AnchorLocator};
use crate::notes::NoteSink;
use crate::ocr::{normalize_bank, normalize_bet, normalize_stack, TextRecognizer};

/// The two avatars the player-relative regions hang off.
#[derive(Debug, Clone)]
pub struct Anchors {
    pub opponent: Anchor,
    pub user: Anchor,
}

impl Anchors {
    pub fn load(config: &TableConfig) -> Result<Self> {
        Ok(Self {
            opponent: Anchor::load("opponent", &config.opponent_anchor_path)?,
            user: Anchor::load("user", &config.user_anchor_path)?,
        })
    }

    pub fn for_seat(&self, seat: Seat) -> &Anchor {
        match seat {
            Seat::Opponent => &self.opponent,
            Seat::User => &self.user,
        }
    }
}

/// Everything a run touches, passed explicitly instead of living in
/// process-wide state.
pub struct Session<'a> {
    pub config: &'a TableConfig,
    pub anchors: &'a Anchors,
    pub screen: &'a dyn ScreenSource,
    pub locator: &'a dyn AnchorLocator,
    pub ocr: &'a dyn TextRecognizer,
    pub sink: &'a mut dyn NoteSink,
}

impl Session<'_> {
    /// Runs the whole sequence and returns what was read.
    ///
    /// The sink is saved whether or not the run succeeds; a save failure
    /// after a run failure is logged and the run's error is returned.
    pub fn run(&mut self) -> Result<TableReading> {
        let result = self.run_steps();
        let saved = self.sink.save().context("Failed to save session log");

        match (result, saved) {
            (Ok(reading), Ok(())) => Ok(reading),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(save_err)) => {
                warn!("Session log not saved after failure: {:#}", save_err);
                Err(e)
            }
        }
    }

    fn run_steps(&mut self) -> Result<TableReading> {
        info!("Recreating session log");
        self.sink.recreate().context("Failed to recreate session log")?;

        let gray = self.snapshot()?;

        let mut reading = TableReading::default();
        for value in TrackedValue::PLAYER_VALUES {
            let text = self.read_player_value(value)?;
            self.record(value, &text)?;
            reading.set(value, text);
        }

        let bank = self.read_bank(&gray)?;
        self.record(TrackedValue::Bank, &bank)?;
        reading.set(TrackedValue::Bank, bank);

        Ok(reading)
    }

    /// Captures the screen, saves it and its grayscale copy, and opens the
    /// copy when the sink switches windows.
    fn snapshot(&self) -> Result<GrayImage> {
        let frame = self.screen.capture().context("Failed to capture screen")?;
        frame
            .save(&self.config.screenshot_path)
            .with_context(|| format!("Failed to save {}", self.config.screenshot_path.display()))?;

        let gray = to_grayscale(&frame);
        gray.save(&self.config.gray_path)
            .with_context(|| format!("Failed to save {}", self.config.gray_path.display()))?;
        info!(
            "Screenshot saved: {} ({}x{}), grayscale copy: {}",
            self.config.screenshot_path.display(),
            frame.width(),
            frame.height(),
            self.config.gray_path.display()
        );

        if self.sink.needs_viewer() {
            open_with_default_app(&self.config.gray_path)?;
        }

        Ok(gray)
    }

    /// Reads one anchor-relative value from a freshly captured frame.
    ///
    /// The anchor is searched again on every call and the crop comes from
    /// the same frame the anchor was found on.
    pub fn read_player_value(&self, value: TrackedValue) -> Result<String> {
        let (Some(seat), Some(rule)) = (value.seat(), value.offset_rule(&self.config.offsets))
        else {
            anyhow::bail!("{} has no anchor-relative region", value);
        };
        let anchor = self.anchors.for_seat(seat);

        let frame = self.screen.capture().context("Failed to capture screen")?;
        let rect = locate(self.locator, &frame, anchor, &rule)?;
        let crop = crop_rect(&frame, rect)?;

        let raw = self
            .ocr
            .extract_text(&DynamicImage::ImageRgba8(crop), value.language(self.config))?;

        let text = match value.kind() {
            ValueKind::Stack => normalize_stack(&raw),
            _ => normalize_bet(&raw),
        };

        if text.is_empty() {
            warn!("{}: OCR text {:?} cleaned to an empty value", value, raw);
        }

        Ok(text)
    }

    /// Reads the pot from the grayscale snapshot; no anchor is involved.
    pub fn read_bank(&self, gray: &GrayImage) -> Result<String> {
        let raw = self.ocr.extract_text(
            &DynamicImage::ImageLuma8(gray.clone()),
            TrackedValue::Bank.language(self.config),
        )?;
        Ok(normalize_bank(&raw, &self.config.bank_label)?)
    }

    fn record(&mut self, value: TrackedValue, text: &str) -> Result<()> {
        let line = value.log_line(text);
        info!("{}", line);
        self.sink
            .append_line(&line)
            .with_context(|| format!("Failed to log {}", value))
    }
}
