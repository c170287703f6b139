/// Validated frames and detector layout adapters
///
/// A detector emits a flat list of keypoints whose meaning depends on its index
/// convention. `Frame` checks the list once against a `LandmarkLayout` so the
/// analyzer only ever sees the named torso points it needs.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::{PostureError, Result};
use crate::models::keypoint::{BodyPart, Keypoint};

/// Accepted planar coordinate range for consumed points; detectors report
/// slightly off-frame landmarks just outside [0, 1]
pub const COORDINATE_RANGE: RangeInclusive<f64> = -1.0..=2.0;

/// Semantic points consumed by the posture analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorsoPoint {
    Nose,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
}

impl TorsoPoint {
    pub fn all() -> [Self; 7] {
        [
            Self::Nose,
            Self::LeftEar,
            Self::RightEar,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftHip,
            Self::RightHip,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
        }
    }
}

impl std::fmt::Display for TorsoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Keypoint index convention of the upstream detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkLayout {
    /// MediaPipe pose landmarker, 33 points
    #[default]
    #[serde(alias = "mediapipe33")]
    MediaPipe,
    /// COCO keypoints, 17 points
    #[serde(alias = "coco17")]
    Coco,
}

impl LandmarkLayout {
    /// Index of a semantic point in this layout
    pub fn index_of(&self, point: TorsoPoint) -> usize {
        match self {
            Self::MediaPipe => match point {
                TorsoPoint::Nose => BodyPart::Nose.index(),
                TorsoPoint::LeftEar => BodyPart::LeftEar.index(),
                TorsoPoint::RightEar => BodyPart::RightEar.index(),
                TorsoPoint::LeftShoulder => BodyPart::LeftShoulder.index(),
                TorsoPoint::RightShoulder => BodyPart::RightShoulder.index(),
                TorsoPoint::LeftHip => BodyPart::LeftHip.index(),
                TorsoPoint::RightHip => BodyPart::RightHip.index(),
            },
            Self::Coco => match point {
                TorsoPoint::Nose => 0,
                TorsoPoint::LeftEar => 3,
                TorsoPoint::RightEar => 4,
                TorsoPoint::LeftShoulder => 5,
                TorsoPoint::RightShoulder => 6,
                TorsoPoint::LeftHip => 11,
                TorsoPoint::RightHip => 12,
            },
        }
    }

    /// Index of a body part in this layout, if the layout tracks it
    pub fn index_of_part(&self, part: BodyPart) -> Option<usize> {
        match self {
            Self::MediaPipe => Some(part.index()),
            Self::Coco => {
                let index = match part {
                    BodyPart::Nose => 0,
                    BodyPart::LeftEye => 1,
                    BodyPart::RightEye => 2,
                    BodyPart::LeftEar => 3,
                    BodyPart::RightEar => 4,
                    BodyPart::LeftShoulder => 5,
                    BodyPart::RightShoulder => 6,
                    BodyPart::LeftElbow => 7,
                    BodyPart::RightElbow => 8,
                    BodyPart::LeftWrist => 9,
                    BodyPart::RightWrist => 10,
                    BodyPart::LeftHip => 11,
                    BodyPart::RightHip => 12,
                    BodyPart::LeftKnee => 13,
                    BodyPart::RightKnee => 14,
                    BodyPart::LeftAnkle => 15,
                    BodyPart::RightAnkle => 16,
                    _ => return None,
                };
                Some(index)
            }
        }
    }

    /// Minimum frame length: one past the highest index the analyzer reads
    pub fn required_len(&self) -> usize {
        TorsoPoint::all()
            .iter()
            .map(|point| self.index_of(*point))
            .max()
            .unwrap_or(0)
            + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MediaPipe => "mediapipe",
            Self::Coco => "coco",
        }
    }
}

impl std::fmt::Display for LandmarkLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The named torso points of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsoLandmarks {
    pub nose: Keypoint,
    pub left_ear: Keypoint,
    pub right_ear: Keypoint,
    pub left_shoulder: Keypoint,
    pub right_shoulder: Keypoint,
    pub left_hip: Keypoint,
    pub right_hip: Keypoint,
}

impl TorsoLandmarks {
    pub fn get(&self, point: TorsoPoint) -> &Keypoint {
        match point {
            TorsoPoint::Nose => &self.nose,
            TorsoPoint::LeftEar => &self.left_ear,
            TorsoPoint::RightEar => &self.right_ear,
            TorsoPoint::LeftShoulder => &self.left_shoulder,
            TorsoPoint::RightShoulder => &self.right_shoulder,
            TorsoPoint::LeftHip => &self.left_hip,
            TorsoPoint::RightHip => &self.right_hip,
        }
    }

    /// Reject points whose planar coordinates are NaN, infinite, or far
    /// outside the normalized image
    pub fn validate(&self) -> Result<()> {
        for part in TorsoPoint::all() {
            let keypoint = self.get(part);
            if !keypoint.is_finite() {
                return Err(PostureError::NonFiniteKeypoint { part });
            }
            if !keypoint.is_within(COORDINATE_RANGE) {
                return Err(PostureError::KeypointOutOfRange { part });
            }
        }
        Ok(())
    }
}

/// Keypoints of one video instant, validated against a layout
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    keypoints: Vec<Keypoint>,
    layout: LandmarkLayout,
}

impl Frame {
    /// Create a frame in the MediaPipe 33-point layout
    pub fn new(keypoints: Vec<Keypoint>) -> Result<Self> {
        Self::with_layout(keypoints, LandmarkLayout::MediaPipe)
    }

    /// Create a frame in the given layout
    ///
    /// Fails when the list is too short for the layout or when a consumed
    /// point has a non-finite coordinate.
    pub fn with_layout(keypoints: Vec<Keypoint>, layout: LandmarkLayout) -> Result<Self> {
        let required = layout.required_len();
        if keypoints.len() < required {
            return Err(PostureError::InvalidFrame {
                required,
                actual: keypoints.len(),
            });
        }

        let frame = Self { keypoints, layout };
        frame.torso().validate()?;
        Ok(frame)
    }

    pub fn layout(&self) -> LandmarkLayout {
        self.layout
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Get keypoint by raw detector index
    pub fn get(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }

    /// Get a body part by name, translated through the frame's layout
    ///
    /// `None` when the layout does not track the part or the frame is too
    /// short to hold it.
    pub fn part(&self, part: BodyPart) -> Option<&Keypoint> {
        self.layout
            .index_of_part(part)
            .and_then(|index| self.keypoints.get(index))
    }

    /// Get a semantic point; always present once the frame is validated
    pub fn point(&self, point: TorsoPoint) -> &Keypoint {
        &self.keypoints[self.layout.index_of(point)]
    }

    /// Extract the named torso points
    pub fn torso(&self) -> TorsoLandmarks {
        TorsoLandmarks {
            nose: *self.point(TorsoPoint::Nose),
            left_ear: *self.point(TorsoPoint::LeftEar),
            right_ear: *self.point(TorsoPoint::RightEar),
            left_shoulder: *self.point(TorsoPoint::LeftShoulder),
            right_shoulder: *self.point(TorsoPoint::RightShoulder),
            left_hip: *self.point(TorsoPoint::LeftHip),
            right_hip: *self.point(TorsoPoint::RightHip),
        }
    }
}
