//! Frame report output port.

use crate::domain::FrameReport;

/// Port for emitting per-frame overlay reports.
pub trait FrameOutput: Send + Sync {
    /// Writes a single frame report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, report: &FrameReport) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
