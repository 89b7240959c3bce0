//! Tracing setup: timestamped events to the console and to a daily log file.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// One file per local day.
fn log_file_name(day: NaiveDate) -> String {
    format!("poker_table_ocr_{}.log", day.format("%Y%m%d"))
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// level.
pub fn init_logging(logs_dir: &Path) -> Result<()> {
    let log_path = logs_dir.join(log_file_name(Local::now().date_naive()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string())),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
