//! Integration tests for replaying detector output from disk.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use gaze_overlay_adapters::{IntervalTicks, ReplayDetector};
use gaze_overlay_core::{
    DetectionResult, Detector, Eye, Frame, GazeClassifier, GazeLabel, OverlayConfig, Point2D,
    Session,
};
use gaze_overlay_test_support::{replay_line, DetectionBuilder, MockFrameOutput, MockSessionSink};
use tempfile::TempDir;

fn write_replay(dir: &TempDir, lines: &[String]) -> PathBuf {
    let path = dir.path().join("capture.jsonl");
    fs::write(&path, lines.join("\n")).expect("write replay file");
    path
}

fn looking_at(left: Point2D, right: Point2D) -> DetectionBuilder {
    DetectionBuilder::keypoints()
        .eye_contour(Eye::Left, left, 15.0)
        .eye_contour(Eye::Right, right, 15.0)
}

#[test]
fn test_open_missing_file() {
    let err = ReplayDetector::open(&PathBuf::from("/nonexistent/capture.jsonl")).err();
    let message = format!("{:#}", err.expect("open should fail"));
    assert!(message.contains("Failed to open replay file"));
}

#[test]
fn test_layouts_survive_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write_replay(
        &dir,
        &[
            replay_line(&[looking_at(Point2D::new(300.0, 240.0), Point2D::new(340.0, 240.0))
                .named("leftIris", 301.0, 241.0)
                .build_record()]),
            replay_line(&[DetectionBuilder::legacy_mesh()
                .point(33, 10.0, 10.0)
                .build_record()]),
        ],
    );

    let detector = ReplayDetector::open(&path).unwrap();
    assert_eq!(detector.frame_count(), 2);

    let first = detector.estimate_faces(&Frame::new(0, 640, 480)).unwrap();
    assert!(matches!(first[0], DetectionResult::Keypoints(_)));
    assert_eq!(
        gaze_overlay_core::resolve_eye(&first[0], Eye::Left),
        Some(Point2D::new(301.0, 241.0))
    );

    let second = detector.estimate_faces(&Frame::new(1, 640, 480)).unwrap();
    assert!(matches!(second[0], DetectionResult::LegacyMesh(_)));
}

#[test]
fn test_malformed_elements_do_not_fail_the_frame() {
    let mut mesh = vec!["null".to_string(); 264];
    mesh[33] = "[300, 240, null]".to_string();
    mesh[263] = "[340, 240, \"deep\"]".to_string();
    mesh[7] = "[1, \"x\"]".to_string();
    let line = format!(r#"[{{"keypoints": "oops", "scaledMesh": [{}]}}]"#, mesh.join(","));

    let dir = TempDir::new().unwrap();
    let path = write_replay(&dir, &[line]);
    let detector = ReplayDetector::open(&path).unwrap();

    let faces = detector.estimate_faces(&Frame::new(0, 640, 480)).unwrap();
    assert_eq!(
        gaze_overlay_core::resolve_eye(&faces[0], Eye::Left),
        Some(Point2D::new(300.0, 240.0))
    );
    assert_eq!(
        gaze_overlay_core::resolve_eye(&faces[0], Eye::Right),
        Some(Point2D::new(340.0, 240.0))
    );
}

#[test]
fn test_replay_drives_a_session() {
    let dir = TempDir::new().unwrap();
    let path = write_replay(
        &dir,
        &[
            replay_line(&[looking_at(Point2D::new(100.0, 80.0), Point2D::new(140.0, 80.0))
                .build_record()]),
            "{ truncated".to_string(),
            "[]".to_string(),
            replay_line(&[looking_at(Point2D::new(300.0, 240.0), Point2D::new(340.0, 240.0))
                .build_record()]),
        ],
    );

    let detector = ReplayDetector::open(&path).unwrap();
    let ticks = IntervalTicks::new(Duration::ZERO, Some(detector.frame_count()));
    let output = MockFrameOutput::new();
    let sink = MockSessionSink::new();

    let session = Session::new(OverlayConfig::default(), GazeClassifier::default(), 640, 480);
    let summary = session.run(&ticks, &detector, &output, &sink).unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.failed, 1);

    let reports = output.reports();
    assert_eq!(reports[0].gaze, Some(GazeLabel::TopLeft));
    assert!(!reports[1].face_detected);
    assert_eq!(reports[2].gaze, Some(GazeLabel::Center));
    assert_eq!(reports[2].frame, 3);

    let failures = sink.failure_messages();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].starts_with("Detection error: Invalid detector output at "));
    assert_eq!(output.flush_count(), 1);
}
