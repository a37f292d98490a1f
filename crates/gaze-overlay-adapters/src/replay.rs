//! Replay adapter for recorded detector output.
//!
//! A replay file holds one line per frame. Each line is a JSON array of face
//! objects exactly as a landmark detector emits them; blank lines are
//! ignored. Lines are decoded lazily, so a malformed line fails only the
//! frame it belongs to.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gaze_overlay_core::{DetectionResult, Detector, FaceRecord, Frame};
use tracing::debug;

/// Detector that returns recorded output, frame `i` from line `i`.
pub struct ReplayDetector {
    source: PathBuf,
    lines: Vec<(usize, String)>,
}

impl ReplayDetector {
    /// Opens a replay file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open replay file: {}", path.display()))?;
        let mut detector = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read replay file: {}", path.display()))?;
        detector.source = path.to_path_buf();
        Ok(detector)
    }

    /// Reads recorded frames from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut lines = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push((number + 1, trimmed.to_string()));
            }
        }

        debug!("Loaded {} recorded frames", lines.len());

        Ok(Self {
            source: PathBuf::from("<reader>"),
            lines,
        })
    }

    /// Number of recorded frames.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        u64::try_from(self.lines.len()).unwrap_or(u64::MAX)
    }
}

impl Detector for ReplayDetector {
    fn estimate_faces(&self, frame: &Frame) -> Result<Vec<DetectionResult>> {
        let (number, line) = usize::try_from(frame.index)
            .ok()
            .and_then(|i| self.lines.get(i))
            .with_context(|| format!("No recorded output for frame {}", frame.index))?;

        let faces: Vec<FaceRecord> = serde_json::from_str(line).with_context(|| {
            format!(
                "Invalid detector output at {}:{number}",
                self.source.display()
            )
        })?;

        debug!(frame = frame.index, faces = faces.len(), "Replayed frame");
        Ok(faces.into_iter().map(DetectionResult::from).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn detector(content: &str) -> ReplayDetector {
        ReplayDetector::from_reader(content.as_bytes()).unwrap()
    }

    #[test]
    fn test_blank_lines_ignored() {
        let d = detector("[]\n\n   \n[]\n");
        assert_eq!(d.frame_count(), 2);
    }

    #[test]
    fn test_frames_map_to_lines() {
        let d = detector("[]\n[{\"keypoints\":[{\"x\":1,\"y\":2}]}]\n");
        assert!(d.estimate_faces(&Frame::new(0, 1, 1)).unwrap().is_empty());

        let faces = d.estimate_faces(&Frame::new(1, 1, 1)).unwrap();
        assert_eq!(faces.len(), 1);
        assert!(faces[0].keypoints().is_some());
    }

    #[test]
    fn test_bad_line_fails_only_its_frame() {
        let d = detector("not json\n[]\n");
        let err = d.estimate_faces(&Frame::new(0, 1, 1)).unwrap_err();
        assert!(format!("{err:#}").contains("<reader>:1"));
        assert!(d.estimate_faces(&Frame::new(1, 1, 1)).is_ok());
    }

    #[test]
    fn test_frame_past_end() {
        let d = detector("[]\n");
        assert!(d.estimate_faces(&Frame::new(5, 1, 1)).is_err());
    }
}
