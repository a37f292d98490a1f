//! Replay command - run recorded detector output through the overlay pipeline.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use gaze_overlay_adapters::{IntervalTicks, ReplayDetector};
use gaze_overlay_core::{GazeClassifier, OverlayConfig, Session, SessionSummary};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, OutputFormat, ProgressBar};

/// Hardcoded default values.
mod defaults {
    pub const WIDTH: u32 = 640;
    pub const HEIGHT: u32 = 480;
    pub const INTERVAL_MS: u64 = 0;
}

/// Parse a non-negative pixel distance.
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not a non-negative number"))
    }
}

/// Parse a strictly positive ratio.
fn parse_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not a positive number"))
    }
}

/// Shared arguments for replaying detector output.
#[derive(Args, Clone)]
pub struct ReplayArgs {
    /// JSON Lines file of recorded detector output, one frame per line
    pub file: Option<PathBuf>,

    /// Frame width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Frame height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Gaze dead zone around the frame center, in pixels
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Eye box height as a fraction of its width
    #[arg(long, value_parser = parse_ratio)]
    pub box_ratio: Option<f64>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    pub max_frames: Option<u64>,

    /// Delay between frames in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl ReplayArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.width = args.width.or(config.frame.width);
        args.height = args.height.or(config.frame.height);
        args.threshold = args.threshold.or(config.gaze.threshold_px);
        args.box_ratio = args.box_ratio.or(config.eye_box.height_ratio);
        args.max_frames = args.max_frames.or(config.session.max_frames);
        args.interval_ms = args.interval_ms.or(config.session.interval_ms);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.config = Some(config.clone());

        args
    }

    fn width(&self) -> u32 {
        self.width.unwrap_or(defaults::WIDTH)
    }

    fn height(&self) -> u32 {
        self.height.unwrap_or(defaults::HEIGHT)
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.unwrap_or(defaults::INTERVAL_MS))
    }

    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn classifier(&self) -> GazeClassifier {
        self.threshold.map_or_else(GazeClassifier::default, GazeClassifier::new)
    }

    /// Overlay style from config, box ratio from CLI or config.
    fn overlay(&self) -> OverlayConfig {
        let mut overlay = OverlayConfig::default();

        if let Some(style) = self.config.as_ref().map(|c| &c.overlay) {
            let colors = [
                (&mut overlay.eye_landmark_color, &style.eye_landmark_color),
                (&mut overlay.eye_center_color, &style.eye_center_color),
                (&mut overlay.iris_point_color, &style.iris_point_color),
                (&mut overlay.iris_landmark_color, &style.iris_landmark_color),
                (&mut overlay.eye_box_color, &style.eye_box_color),
            ];
            for (slot, value) in colors {
                if let Some(color) = value {
                    slot.clone_from(color);
                }
            }

            overlay.iris_point_size = style.iris_point_size.unwrap_or(overlay.iris_point_size);
            overlay.eye_center_size = style.eye_center_size.unwrap_or(overlay.eye_center_size);
            overlay.landmark_width = style.landmark_width.unwrap_or(overlay.landmark_width);
            overlay.eye_box_width = style.eye_box_width.unwrap_or(overlay.eye_box_width);
        }

        if let Some(ratio) = self.box_ratio {
            overlay.eye_box_height_ratio = ratio;
        }

        overlay
    }
}

/// Result of running the replay command.
pub struct ReplayResult {
    /// Session counters.
    pub summary: SessionSummary,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the replay command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &ReplayArgs) -> Result<ReplayResult> {
    let file = args
        .file
        .as_ref()
        .context("No replay file specified. Use --help for usage information.")?;
    info!("Replaying {}", file.display());

    let detector = ReplayDetector::open(file)?;
    let frames = args
        .max_frames
        .map_or(detector.frame_count(), |max| max.min(detector.frame_count()));
    debug!(
        frames,
        width = args.width(),
        height = args.height(),
        "Session parameters"
    );

    let ticks = IntervalTicks::new(args.interval(), Some(frames));

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(Some(frames), args.quiet, show_progress);

    let output = JsonOutput::stdout(args.format(), args.pretty);

    let session = Session::new(args.overlay(), args.classifier(), args.width(), args.height());
    let summary = session.run(&ticks, &detector, &output, &progress_bar)?;
    output.finish()?;

    let exit_code = if summary.has_failures() {
        ExitCode::DetectionFailed
    } else {
        ExitCode::Success
    };

    Ok(ReplayResult { summary, exit_code })
}
