#![allow(dead_code)]

use posture_coach_core::{BodyPart, Frame, Keypoint, LandmarkLayout, TorsoLandmarks};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("trace")
            .with_test_writer()
            .init();
    });
}

/// Seated upright: ears stacked over shoulders over hips, nose centred
pub fn upright_torso() -> TorsoLandmarks {
    TorsoLandmarks {
        nose: Keypoint::new(0.5, 0.2).with_visibility(0.99),
        left_ear: Keypoint::new(0.45, 0.25).with_visibility(0.9),
        right_ear: Keypoint::new(0.55, 0.25).with_visibility(0.9),
        left_shoulder: Keypoint::new(0.4, 0.4).with_visibility(0.98),
        right_shoulder: Keypoint::new(0.6, 0.4).with_visibility(0.98),
        left_hip: Keypoint::new(0.4, 0.8).with_visibility(0.7),
        right_hip: Keypoint::new(0.6, 0.8).with_visibility(0.7),
    }
}

/// Place torso points into a full 33-point MediaPipe frame
pub fn mediapipe_keypoints(torso: &TorsoLandmarks) -> Vec<Keypoint> {
    let mut keypoints = vec![Keypoint::new(0.5, 0.5).with_visibility(0.1); BodyPart::COUNT];
    keypoints[BodyPart::Nose.index()] = torso.nose;
    keypoints[BodyPart::LeftEar.index()] = torso.left_ear;
    keypoints[BodyPart::RightEar.index()] = torso.right_ear;
    keypoints[BodyPart::LeftShoulder.index()] = torso.left_shoulder;
    keypoints[BodyPart::RightShoulder.index()] = torso.right_shoulder;
    keypoints[BodyPart::LeftHip.index()] = torso.left_hip;
    keypoints[BodyPart::RightHip.index()] = torso.right_hip;
    keypoints
}

/// Place torso points into a 17-point COCO frame
pub fn coco_keypoints(torso: &TorsoLandmarks) -> Vec<Keypoint> {
    let mut keypoints = vec![Keypoint::new(0.5, 0.5).with_visibility(0.1); 17];
    keypoints[0] = torso.nose;
    keypoints[3] = torso.left_ear;
    keypoints[4] = torso.right_ear;
    keypoints[5] = torso.left_shoulder;
    keypoints[6] = torso.right_shoulder;
    keypoints[11] = torso.left_hip;
    keypoints[12] = torso.right_hip;
    keypoints
}

pub fn mediapipe_frame(torso: &TorsoLandmarks) -> Frame {
    Frame::new(mediapipe_keypoints(torso)).expect("torso frame should validate")
}

pub fn coco_frame(torso: &TorsoLandmarks) -> Frame {
    Frame::with_layout(coco_keypoints(torso), LandmarkLayout::Coco)
        .expect("torso frame should validate")
}

pub fn upright_frame() -> Frame {
    mediapipe_frame(&upright_torso())
}
