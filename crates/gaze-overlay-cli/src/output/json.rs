//! JSON output adapter.

use anyhow::Result;
use clap::ValueEnum;
use gaze_overlay_core::{FrameOutput, FrameReport};
use std::io::{self, Write};
use std::sync::Mutex;

/// Output format for frame reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per frame)
    #[default]
    Jsonl,
    /// Single JSON array, written when the session ends
    Json,
}

/// JSON output adapter.
///
/// In JSON Lines mode each report is written as it arrives. In array mode
/// reports are held until [`JsonOutput::finish`].
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    format: OutputFormat,
    pretty: bool,
    pending: Mutex<Vec<FrameReport>>,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(format: OutputFormat, pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), format, pretty)
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
            pretty,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Writes held reports as a JSON array. No-op in JSON Lines mode.
    #[allow(clippy::significant_drop_tightening)]
    pub fn finish(&self) -> Result<()> {
        if self.format != OutputFormat::Json {
            return Ok(());
        }

        let reports = std::mem::take(
            &mut *self
                .pending
                .lock()
                .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
        );
        let json = if self.pretty {
            serde_json::to_string_pretty(&reports)?
        } else {
            serde_json::to_string(&reports)?
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }
}

impl FrameOutput for JsonOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, report: &FrameReport) -> Result<()> {
        if self.format == OutputFormat::Json {
            self.pending
                .lock()
                .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
                .push(report.clone());
            return Ok(());
        }

        let json = serde_json::to_string(report)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
