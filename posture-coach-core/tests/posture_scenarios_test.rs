/// Integration tests for the posture analyzer
///
/// Tests cover:
/// - Reference scenarios (upright, slouch, uneven shoulders, forward head)
/// - Layout adapters producing identical results for the same pose
/// - Frame validation at the input boundary
/// - Concurrent use of one analyzer
mod common;

use assert_matches::assert_matches;
use posture_coach_core::{
    analyze, Frame, Keypoint, LandmarkLayout, PostureAnalyzer, PostureError, PostureStatus,
    SessionTracker,
};
use pretty_assertions::assert_eq;

#[test]
fn test_upright_posture_scores_full_marks() {
    common::init_test_logging();

    let metrics = analyze(&common::upright_frame());

    assert_eq!(metrics.neck_angle, 180);
    assert_eq!(metrics.spine_angle, 0);
    assert_eq!(metrics.shoulder_alignment, 100);
    assert_eq!(metrics.overall_score, 100);
    assert_eq!(metrics.status, PostureStatus::Good);
    assert!(metrics.issues.is_empty());
}

#[test]
fn test_visibility_does_not_affect_scoring() {
    let mut torso = common::upright_torso();
    torso.left_hip.visibility = Some(0.0);
    torso.right_hip.visibility = None;
    torso.nose.visibility = Some(0.01);

    assert_eq!(
        analyze(&common::mediapipe_frame(&torso)),
        analyze(&common::upright_frame())
    );
}

#[test]
fn test_slouch_with_forward_head() {
    let mut torso = common::upright_torso();
    // Head and shoulders drift toward the screen while the hips stay put
    torso.left_ear.x = 0.7;
    torso.right_ear.x = 0.8;
    torso.nose.x = 0.8;
    torso.left_shoulder.x = 0.45;
    torso.right_shoulder.x = 0.65;

    let metrics = analyze(&common::mediapipe_frame(&torso));

    assert_eq!(
        metrics.issue_messages(),
        vec!["Neck tilted forward — adjust screen height"]
    );
    assert_eq!(metrics.neck_angle, 134);
    // A single moderate issue still leaves the composite in the good band
    assert_eq!(metrics.overall_score, 82);
    assert_eq!(metrics.status, PostureStatus::Good);
}

#[test]
fn test_json_output_shape() {
    let mut torso = common::upright_torso();
    torso.left_shoulder.y = 0.3;
    torso.right_shoulder.y = 0.5;

    let metrics = analyze(&common::mediapipe_frame(&torso));
    let json = serde_json::to_value(&metrics).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "neck_angle": 180,
            "shoulder_alignment": 0,
            "spine_angle": 0,
            "overall_score": 75,
            "status": "fair",
            "issues": ["Shoulders uneven — try to level them"],
        })
    );
}

#[test]
fn test_coco_and_mediapipe_layouts_agree() {
    let mut torso = common::upright_torso();
    torso.left_ear.x = 0.52;
    torso.right_ear.x = 0.62;
    torso.nose.x = 0.64;
    torso.left_hip.x = 0.3;
    torso.right_hip.x = 0.5;

    let from_mediapipe = analyze(&common::mediapipe_frame(&torso));
    let from_coco = analyze(&common::coco_frame(&torso));

    assert_eq!(from_mediapipe, from_coco);
}

#[test]
fn test_frame_must_cover_right_hip() {
    let mut keypoints = common::mediapipe_keypoints(&common::upright_torso());
    keypoints.truncate(24);

    assert_matches!(
        Frame::new(keypoints),
        Err(PostureError::InvalidFrame {
            required: 25,
            actual: 24
        })
    );
}

#[test]
fn test_truncated_mediapipe_frame_is_enough() {
    let mut keypoints = common::mediapipe_keypoints(&common::upright_torso());
    keypoints.truncate(25);

    let frame = Frame::new(keypoints).unwrap();
    assert_eq!(analyze(&frame).overall_score, 100);
}

#[test]
fn test_coco_frame_in_mediapipe_layout_is_rejected() {
    let keypoints = common::coco_keypoints(&common::upright_torso());
    assert_matches!(
        Frame::with_layout(keypoints, LandmarkLayout::MediaPipe),
        Err(PostureError::InvalidFrame { actual: 17, .. })
    );
}

#[test]
fn test_nan_landmark_error_names_the_point() {
    let mut keypoints = common::mediapipe_keypoints(&common::upright_torso());
    keypoints[24] = Keypoint::new(f64::NAN, 0.8);

    let err = Frame::new(keypoints).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid frame: right_hip has a non-finite coordinate"
    );
}

#[test]
fn test_overflowing_coordinates_never_reach_scoring() {
    let mut keypoints = common::mediapipe_keypoints(&common::upright_torso());
    for index in [11, 12, 23, 24] {
        keypoints[index].x = 1e308;
    }

    let err = Frame::new(keypoints).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid frame: left_shoulder lies outside the normalized image range"
    );
}

#[test]
fn test_analyzer_shared_across_threads() {
    let analyzer = PostureAnalyzer::new();
    let frames: Vec<Frame> = (0..16)
        .map(|i| {
            let mut torso = common::upright_torso();
            torso.nose.x = 0.5 + i as f64 * 0.01;
            common::mediapipe_frame(&torso)
        })
        .collect();

    let sequential: Vec<_> = frames.iter().map(|f| analyzer.analyze(f)).collect();

    let shared = &analyzer;
    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = frames
            .iter()
            .map(|frame| scope.spawn(move || shared.analyze(frame)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn test_session_over_recorded_frames() {
    common::init_test_logging();

    let analyzer = PostureAnalyzer::new();
    let mut tracker = SessionTracker::new(0);

    let mut slouched = common::upright_torso();
    slouched.left_hip.x = 0.1;
    slouched.right_hip.x = 0.3;
    slouched.left_shoulder.y = 0.3;
    slouched.right_shoulder.y = 0.5;

    // 20 seconds at 10 fps: upright for the first half, slouched afterwards
    for tick in 0..200u64 {
        let timestamp_ms = tick * 100;
        let torso = if tick < 100 {
            common::upright_torso()
        } else {
            slouched
        };
        let metrics = analyzer.analyze(&common::mediapipe_frame(&torso));
        let poor_snapshot = tracker
            .observe(timestamp_ms, &metrics)
            .map(|snapshot| snapshot.posture_state == PostureStatus::Poor)
            .unwrap_or(false);
        if poor_snapshot {
            let issue = metrics.issues[0];
            tracker.record_alert(timestamp_ms, issue.into(), issue.message());
        }
    }

    let snapshots: Vec<u64> = tracker
        .snapshots()
        .iter()
        .map(|s| s.captured_at_ms)
        .collect();
    assert_eq!(snapshots, vec![5_000, 10_000, 15_000]);

    let summary = tracker.finish(20_000);
    assert_eq!(summary.frames_analyzed, 200);
    assert_eq!(summary.snapshot_count, 3);
    assert_eq!(summary.good_posture_percent.map(|p| p.round()), Some(33.0));
    assert_eq!(summary.total_alerts, 2);
    // The slouch trips the neck rule first
    assert_eq!(summary.neck_alerts, 2);
    assert_eq!(summary.spine_alerts, 0);
}
