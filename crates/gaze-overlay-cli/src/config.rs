//! Configuration file support for gaze-overlay.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/gaze-overlay/config.toml` (lowest priority)
//! - Project-local: `.gaze-overlay.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Name of the project-local config file.
pub const PROJECT_CONFIG_NAME: &str = ".gaze-overlay.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Frame geometry.
    pub frame: FrameConfig,
    /// Gaze classifier settings.
    pub gaze: GazeConfig,
    /// Eye box proportions.
    pub eye_box: EyeBoxConfig,
    /// Overlay colors and sizes.
    pub overlay: OverlayStyleConfig,
    /// Session pacing.
    pub session: SessionConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Frame geometry configuration.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frame width in pixels.
    pub width: Option<u32>,
    /// Frame height in pixels.
    pub height: Option<u32>,
}

/// Gaze classifier configuration.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GazeConfig {
    /// Dead zone around the frame center, in pixels.
    pub threshold_px: Option<f64>,
}

/// Eye box configuration.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EyeBoxConfig {
    /// Box height as a fraction of its width.
    pub height_ratio: Option<f64>,
}

/// Overlay style configuration.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlayStyleConfig {
    /// Eye contour outline color.
    pub eye_landmark_color: Option<String>,
    /// Eye center color.
    pub eye_center_color: Option<String>,
    /// Named iris point color.
    pub iris_point_color: Option<String>,
    /// Iris outline color.
    pub iris_landmark_color: Option<String>,
    /// Eye box color.
    pub eye_box_color: Option<String>,
    /// Radius of the named iris points.
    pub iris_point_size: Option<f64>,
    /// Radius of the eye centers.
    pub eye_center_size: Option<f64>,
    /// Stroke width of contours.
    pub landmark_width: Option<f64>,
    /// Stroke width of eye boxes.
    pub eye_box_width: Option<f64>,
}

/// Session pacing configuration.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Delay between ticks in milliseconds.
    pub interval_ms: Option<u64>,
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/gaze-overlay/config.toml`
    /// 2. Project-local: `.gaze-overlay.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Out-of-range values are dropped
    /// with a warning.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for warning in config.sanitize() {
            eprintln!("warning: {warning}");
        }

        config
    }

    /// Drop values outside their acceptable ranges, so they fall back to the
    /// defaults. Returns one message per dropped value.
    fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(t) = self.gaze.threshold_px {
            if !t.is_finite() || t < 0.0 {
                warnings.push(format!("gaze.threshold_px must be a non-negative number, got {t}"));
                self.gaze.threshold_px = None;
            }
        }
        if let Some(r) = self.eye_box.height_ratio {
            if !r.is_finite() || r <= 0.0 {
                warnings.push(format!("eye_box.height_ratio must be positive, got {r}"));
                self.eye_box.height_ratio = None;
            }
        }

        let overlay = &mut self.overlay;
        for (key, slot) in [
            ("overlay.iris_point_size", &mut overlay.iris_point_size),
            ("overlay.eye_center_size", &mut overlay.eye_center_size),
            ("overlay.landmark_width", &mut overlay.landmark_width),
            ("overlay.eye_box_width", &mut overlay.eye_box_width),
        ] {
            if let Some(v) = *slot {
                if !v.is_finite() || v < 0.0 {
                    warnings.push(format!("{key} must be a non-negative number, got {v}"));
                    *slot = None;
                }
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                warnings.push(format!("output.format must be 'json' or 'jsonl', got '{f}'"));
                self.output.format = None;
            }
        }

        warnings
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.frame.width = other.frame.width.or(self.frame.width);
        self.frame.height = other.frame.height.or(self.frame.height);

        self.gaze.threshold_px = other.gaze.threshold_px.or(self.gaze.threshold_px);
        self.eye_box.height_ratio = other.eye_box.height_ratio.or(self.eye_box.height_ratio);

        let overlay = &mut self.overlay;
        let theirs = other.overlay;
        overlay.eye_landmark_color = theirs
            .eye_landmark_color
            .or_else(|| overlay.eye_landmark_color.take());
        overlay.eye_center_color = theirs
            .eye_center_color
            .or_else(|| overlay.eye_center_color.take());
        overlay.iris_point_color = theirs
            .iris_point_color
            .or_else(|| overlay.iris_point_color.take());
        overlay.iris_landmark_color = theirs
            .iris_landmark_color
            .or_else(|| overlay.iris_landmark_color.take());
        overlay.eye_box_color = theirs.eye_box_color.or_else(|| overlay.eye_box_color.take());
        overlay.iris_point_size = theirs.iris_point_size.or(overlay.iris_point_size);
        overlay.eye_center_size = theirs.eye_center_size.or(overlay.eye_center_size);
        overlay.landmark_width = theirs.landmark_width.or(overlay.landmark_width);
        overlay.eye_box_width = theirs.eye_box_width.or(overlay.eye_box_width);

        self.session.interval_ms = other.session.interval_ms.or(self.session.interval_ms);
        self.session.max_frames = other.session.max_frames.or(self.session.max_frames);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
pub fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gaze-overlay").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
pub fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.gaze-overlay.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_CONFIG_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.gaze.threshold_px.is_none());
        assert!(config.eye_box.height_ratio.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.frame.width.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[frame]
width = 1280
height = 720

[gaze]
threshold_px = 80.0

[eye_box]
height_ratio = 0.5

[overlay]
eye_box_color = 'red'
iris_landmark_color = 'cyan'
eye_center_size = 4.0

[session]
interval_ms = 33
max_frames = 100

[output]
format = 'json'
pretty = true
progress = false
";
        let mut config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.frame.width, Some(1280));
        assert_eq!(config.frame.height, Some(720));
        assert_eq!(config.gaze.threshold_px, Some(80.0));
        assert_eq!(config.eye_box.height_ratio, Some(0.5));
        assert_eq!(config.overlay.eye_box_color.as_deref(), Some("red"));
        assert_eq!(config.overlay.eye_center_size, Some(4.0));
        assert_eq!(config.session.interval_ms, Some(33));
        assert_eq!(config.session.max_frames, Some(100));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.pretty, Some(true));
        assert!(config.sanitize().is_empty());
        assert_eq!(config.gaze.threshold_px, Some(80.0));
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[gaze]
threshold_px = 50.0

[frame]
width = 640

[overlay]
eye_box_color = 'green'
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[gaze]
threshold_px = 70.0

[session]
max_frames = 10
",
        )
        .expect("parse override");

        base.merge(override_config);

        // Threshold overridden
        assert_eq!(base.gaze.threshold_px, Some(70.0));
        // Preserved from base
        assert_eq!(base.frame.width, Some(640));
        assert_eq!(base.overlay.eye_box_color.as_deref(), Some("green"));
        // Added from override
        assert_eq!(base.session.max_frames, Some(10));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[eye_box]
height_ratio = 0.25

[output]
format = 'jsonl'
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.eye_box.height_ratio, Some(0.25));
        assert_eq!(base.output.format.as_deref(), Some("jsonl"));
    }

    #[test]
    fn test_sanitize_drops_bad_values() {
        let mut config: AppConfig = toml::from_str(
            r"
[gaze]
threshold_px = -10.0

[eye_box]
height_ratio = 0.0

[overlay]
eye_box_width = -2.0
eye_center_size = 4.0

[output]
format = 'xml'
pretty = true
",
        )
        .unwrap();

        let warnings = config.sanitize();

        assert_eq!(warnings.len(), 4);
        assert!(warnings[0].contains("gaze.threshold_px"));
        assert!(warnings[1].contains("eye_box.height_ratio"));
        assert!(warnings[2].contains("overlay.eye_box_width"));
        assert!(warnings[3].contains("output.format"));

        assert!(config.gaze.threshold_px.is_none());
        assert!(config.eye_box.height_ratio.is_none());
        assert!(config.overlay.eye_box_width.is_none());
        assert!(config.output.format.is_none());
        // Valid neighbors survive
        assert_eq!(config.overlay.eye_center_size, Some(4.0));
        assert_eq!(config.output.pretty, Some(true));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config: AppConfig = toml::from_str("[gaze]\nsmoothing = 3\n").unwrap();
        assert!(config.gaze.threshold_px.is_none());
    }

    #[test]
    fn test_find_config_in_parents() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(PROJECT_CONFIG_NAME), "").unwrap();

        let found = find_config_in_parents(&nested).unwrap();
        assert_eq!(found, root.path().join(PROJECT_CONFIG_NAME));
    }

    #[test]
    fn test_config_serializes_for_display() {
        let config: AppConfig = toml::from_str("[frame]\nwidth = 800\n").unwrap();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("width = 800"));
        assert!(!text.contains("height"));
    }
}
