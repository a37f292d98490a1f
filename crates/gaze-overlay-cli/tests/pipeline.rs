//! Pipeline integration tests using synthetic detector output.
//!
//! Tests the full replay pipeline with programmatically generated recordings.

#![allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::expect_used,
    deprecated
)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use gaze_overlay_core::{Eye, FaceRecord, Point2D};
use gaze_overlay_test_support::{replay_line, DetectionBuilder};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn isolated(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gaze-overlay").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"));
    cmd
}

/// Writes a replay file with the given lines.
fn create_replay(dir: &TempDir, lines: &[String]) -> PathBuf {
    let path = dir.path().join("capture.jsonl");
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// Keypoint face whose eye midpoint sits at (x, y).
fn face_at(x: f64, y: f64) -> FaceRecord {
    DetectionBuilder::keypoints()
        .eye_contour(Eye::Left, Point2D::new(x - 20.0, y), 15.0)
        .eye_contour(Eye::Right, Point2D::new(x + 20.0, y), 15.0)
        .build_record()
}

fn reports(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

// === Gaze Zones ===

#[test]
fn test_gaze_zones_across_frames() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_replay(
        &dir,
        &[
            replay_line(&[face_at(320.0, 240.0)]),
            replay_line(&[face_at(200.0, 100.0)]),
            replay_line(&[face_at(320.0, 100.0)]),
            replay_line(&[face_at(450.0, 240.0)]),
            replay_line(&[face_at(450.0, 400.0)]),
            replay_line(&[face_at(321.0, 241.0)]),
        ],
    );

    let output = isolated(&dir).arg(&file).output().unwrap();
    assert!(output.status.success());

    let labels: Vec<_> = reports(&output.stdout)
        .iter()
        .map(|r| r["gaze_text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        labels,
        ["Center", "Top Left", "Top", "Right", "Bottom Right", "Center"]
    );
}

#[test]
fn test_only_first_face_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_replay(
        &dir,
        &[replay_line(&[face_at(200.0, 100.0), face_at(320.0, 240.0)])],
    );

    let output = isolated(&dir).arg(&file).output().unwrap();
    assert_eq!(reports(&output.stdout)[0]["gaze_text"], "Top Left");
}

// === Landmark Layouts ===

#[test]
fn test_named_iris_overrides_contour() {
    let dir = tempfile::tempdir().unwrap();
    let face = DetectionBuilder::keypoints()
        .eye_contour(Eye::Left, Point2D::new(300.0, 240.0), 15.0)
        .eye_contour(Eye::Right, Point2D::new(340.0, 240.0), 15.0)
        .named("leftIris", 302.4, 238.6)
        .named("rightIris", 338.5, 238.5)
        .build_record();
    let file = create_replay(&dir, &[replay_line(&[face])]);

    let output = isolated(&dir).arg(&file).output().unwrap();
    let report = &reports(&output.stdout)[0];
    assert_eq!(report["left_eye"]["text"], "X: 302, Y: 239");
    assert_eq!(report["right_eye"]["text"], "X: 339, Y: 239");

    let points = report["draw"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|d| d["kind"] == "point")
        .count();
    assert_eq!(points, 4, "two eye centers and two named iris points");
}

#[test]
fn test_iris_ring_drawn_for_keypoints() {
    let dir = tempfile::tempdir().unwrap();
    let face = DetectionBuilder::keypoints()
        .iris(Eye::Left, Point2D::new(300.0, 240.0), 4.0)
        .iris(Eye::Right, Point2D::new(340.0, 240.0), 4.0)
        .build_record();
    let file = create_replay(&dir, &[replay_line(&[face])]);

    let output = isolated(&dir).arg(&file).output().unwrap();
    let report = &reports(&output.stdout)[0];

    let iris_contours: Vec<_> = report["draw"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|d| d["kind"] == "contour" && d["color"] == "yellow")
        .collect();
    assert_eq!(iris_contours.len(), 2);
    assert_eq!(iris_contours[0]["points"].as_array().unwrap().len(), 5);
    assert_eq!(report["gaze_text"], "Center");
}

#[test]
fn test_legacy_mesh_replay() {
    let dir = tempfile::tempdir().unwrap();
    let face = DetectionBuilder::legacy_mesh()
        .eye_contour(Eye::Left, Point2D::new(180.0, 100.0), 15.0)
        .eye_contour(Eye::Right, Point2D::new(220.0, 100.0), 15.0)
        .build_record();
    let file = create_replay(&dir, &[replay_line(&[face])]);

    let output = isolated(&dir).arg(&file).output().unwrap();
    let report = &reports(&output.stdout)[0];
    assert_eq!(report["gaze_text"], "Top Left");
    assert_eq!(report["left_eye"]["text"], "X: 180, Y: 100");
}

#[test]
fn test_one_eye_missing() {
    let dir = tempfile::tempdir().unwrap();
    let face = DetectionBuilder::keypoints()
        .eye_contour(Eye::Left, Point2D::new(300.0, 240.0), 15.0)
        .build_record();
    let file = create_replay(&dir, &[replay_line(&[face])]);

    let output = isolated(&dir).arg(&file).output().unwrap();
    let report = &reports(&output.stdout)[0];
    assert_eq!(report["face_detected"], true);
    assert_eq!(report["left_eye"]["text"], "Not detected");
    assert_eq!(report["gaze_text"], "Not detected");
}

// === Eye Boxes ===

#[test]
fn test_box_ratio_flag() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_replay(&dir, &[replay_line(&[face_at(320.0, 240.0)])]);

    let output = isolated(&dir)
        .arg("--box-ratio")
        .arg("0.5")
        .arg(&file)
        .output()
        .unwrap();
    let report = &reports(&output.stdout)[0];

    let boxes: Vec<_> = report["draw"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|d| d["kind"] == "box")
        .collect();
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0]["width"], 30.0);
    assert_eq!(boxes[0]["height"], 15.0);
    assert_eq!(boxes[0]["x"], 285.0);
    assert_eq!(boxes[0]["y"], 232.5);
}

// === Failures and Limits ===

#[test]
fn test_malformed_line_fails_frame_but_continues() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_replay(
        &dir,
        &[
            replay_line(&[face_at(320.0, 240.0)]),
            "{\"keypoints\": [".to_string(),
            "not json either".to_string(),
            replay_line(&[face_at(320.0, 240.0)]),
        ],
    );

    let output = isolated(&dir).arg(&file).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let frames: Vec<_> = reports(&output.stdout)
        .iter()
        .map(|r| r["frame"].as_u64().unwrap())
        .collect();
    assert_eq!(frames, [0, 3]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("WARN: frame").count(),
        1,
        "only the first failure is reported: {stderr}"
    );
    assert!(stderr.contains("Detection error: Invalid detector output"));
}

#[test]
fn test_quiet_suppresses_failure_message() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_replay(&dir, &["oops".to_string()]);

    isolated(&dir)
        .arg("-q")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("WARN: frame").not());
}

#[test]
fn test_max_frames_limits_session() {
    let dir = tempfile::tempdir().unwrap();
    let line = replay_line(&[face_at(320.0, 240.0)]);
    let file = create_replay(&dir, &[line.clone(), line.clone(), line]);

    let output = isolated(&dir)
        .args(["--max-frames", "2"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(reports(&output.stdout).len(), 2);
}

#[test]
fn test_zero_width_skips_every_frame() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_replay(&dir, &["oops".to_string(), "[]".to_string()]);

    // Skipped frames never reach the detector, so the bad line is harmless.
    isolated(&dir)
        .args(["--width", "0"])
        .arg(&file)
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_logs_session() {
    let dir = tempfile::tempdir().unwrap();
    let file = create_replay(&dir, &[replay_line(&[face_at(320.0, 240.0)])]);

    isolated(&dir)
        .arg("-v")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("Tracking started"));
}
