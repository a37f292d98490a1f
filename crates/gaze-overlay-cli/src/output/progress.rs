//! Progress bar adapter using indicatif.

use gaze_overlay_core::{SessionEvent, SessionSink};
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar adapter for CLI output.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
    quiet: bool,
}

impl ProgressBar {
    /// Creates a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `total` - Total number of frames, if known
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show progress bar; otherwise only warnings are printed
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        if quiet {
            return Self {
                bar: None,
                quiet: true,
            };
        }

        let bar = if show_bar {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);

            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            ) {
                bar.set_style(style.progress_chars("#>-"));
            }

            Some(bar)
        } else {
            None
        };

        Self { bar, quiet }
    }

    fn advance_to(&self, index: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(index + 1);
        }
    }
}

impl SessionSink for ProgressBar {
    fn on_event(&self, event: SessionEvent) {
        if self.quiet {
            return;
        }

        match event {
            SessionEvent::Started { total } => {
                if let (Some(bar), Some(t)) = (&self.bar, total) {
                    bar.set_length(t);
                }
            }
            SessionEvent::FrameProcessed { index, gaze, .. } => {
                self.advance_to(index);
                if let (Some(bar), Some(label)) = (&self.bar, gaze) {
                    bar.set_message(label.to_string());
                }
            }
            SessionEvent::DetectionFailed { index, message } => {
                self.advance_to(index);
                match &self.bar {
                    Some(bar) => bar.println(format!("WARN: frame {index}: {message}")),
                    None => eprintln!("WARN: frame {index}: {message}"),
                }
            }
            SessionEvent::Skipped { frame } => self.advance_to(frame.index),
            SessionEvent::Stopped {
                processed,
                failed,
                skipped,
            } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(format!(
                        "Done: {processed} processed, {failed} failed, {skipped} skipped"
                    ));
                }
            }
        }
    }
}
