/// Posture Analyzer
///
/// Maps one frame's torso keypoints to a posture assessment:
/// - Neck angle at the shoulder midpoint (ears over shoulders over hips)
/// - Shoulder levelness from the vertical shoulder offset
/// - Spine lean from vertical
/// - Forward-head offset of the nose from the shoulder midpoint
///
/// Each rule yields a sub-score in [0, 100]; the overall score is their weighted
/// sum. The analyzer holds only its scoring policy and never mutates it, so one
/// instance can be shared freely across threads.

use crate::config::{ScoringPolicy, ScoringWeights};
use crate::error::Result;
use crate::models::frame::{Frame, TorsoLandmarks};
use crate::models::posture::{PostureIssue, PostureMetrics, PostureStatus};
use crate::services::geometry::{angle_between, midpoint, vertical_angle};

/// Unrounded geometric measurements of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureMeasurements {
    /// Degrees at the shoulder midpoint between ear midpoint and hip midpoint
    pub neck_angle: f64,
    /// Levelness score, 0-100
    pub shoulder_alignment: f64,
    /// Degrees from vertical of the shoulder-to-hip segment
    pub spine_angle: f64,
    /// Signed horizontal nose offset from the shoulder midpoint
    pub head_offset: f64,
}

/// Per-rule sub-scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub neck: f64,
    pub spine: f64,
    pub shoulders: f64,
    pub head: f64,
}

impl ScoreBreakdown {
    /// Weighted sum of the sub-scores, before rounding
    pub fn composite(&self, weights: &ScoringWeights) -> f64 {
        self.neck * weights.neck
            + self.spine * weights.spine
            + self.shoulders * weights.shoulders
            + self.head * weights.head
    }
}

/// Full analyzer output: the metrics record plus the values it was derived from
#[derive(Debug, Clone, PartialEq)]
pub struct PostureAssessment {
    pub measurements: PostureMeasurements,
    pub scores: ScoreBreakdown,
    pub metrics: PostureMetrics,
}

/// Posture analyzer service
#[derive(Debug, Clone, Default)]
pub struct PostureAnalyzer {
    policy: ScoringPolicy,
}

impl PostureAnalyzer {
    /// Create an analyzer with the default scoring policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom scoring policy
    pub fn with_policy(policy: ScoringPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Analyze a validated frame
    pub fn analyze(&self, frame: &Frame) -> PostureMetrics {
        self.assess(frame).metrics
    }

    /// Analyze torso points obtained outside of a `Frame`
    pub fn analyze_torso(&self, torso: &TorsoLandmarks) -> Result<PostureMetrics> {
        torso.validate()?;
        Ok(self.evaluate(torso).metrics)
    }

    /// Analyze a frame and keep the intermediate measurements and sub-scores
    pub fn assess(&self, frame: &Frame) -> PostureAssessment {
        self.evaluate(&frame.torso())
    }

    fn evaluate(&self, torso: &TorsoLandmarks) -> PostureAssessment {
        let policy = &self.policy;

        let shoulder_mid = midpoint(&torso.left_shoulder, &torso.right_shoulder);
        let hip_mid = midpoint(&torso.left_hip, &torso.right_hip);
        let ear_mid = midpoint(&torso.left_ear, &torso.right_ear);

        let neck_angle = angle_between(&ear_mid, &shoulder_mid, &hip_mid);
        let shoulder_offset = (torso.left_shoulder.y - torso.right_shoulder.y).abs();
        let shoulder_alignment =
            (100.0 - shoulder_offset * policy.shoulders.offset_penalty).clamp(0.0, 100.0);
        let spine_angle = vertical_angle(&shoulder_mid, &hip_mid);
        let head_offset = torso.nose.x - shoulder_mid.x;

        let mut issues = Vec::new();

        let neck = if neck_angle < policy.neck.min_angle {
            issues.push(PostureIssue::NeckTiltedForward);
            (neck_angle / policy.neck.min_angle * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };

        let spine = if spine_angle > policy.spine.max_angle {
            issues.push(PostureIssue::SpineLeaning);
            (100.0 - (spine_angle - policy.spine.max_angle) * policy.spine.penalty_per_degree)
                .clamp(0.0, 100.0)
        } else {
            100.0
        };

        if shoulder_alignment < policy.shoulders.min_alignment {
            issues.push(PostureIssue::ShouldersUneven);
        }

        // A forward head is already explained by a tilted neck; report only one
        let head = if head_offset.abs() > policy.head.max_offset {
            if !issues.contains(&PostureIssue::NeckTiltedForward) {
                issues.push(PostureIssue::HeadForward);
            }
            (100.0 - head_offset.abs() * policy.head.offset_penalty).clamp(0.0, 100.0)
        } else {
            100.0
        };

        let scores = ScoreBreakdown {
            neck,
            spine,
            shoulders: shoulder_alignment,
            head,
        };
        let overall_score = scores.composite(&policy.weights).round().clamp(0.0, 100.0) as u8;
        let status = PostureStatus::from_score(overall_score, &policy.status);

        tracing::trace!(
            neck_angle,
            spine_angle,
            shoulder_alignment,
            head_offset,
            overall_score,
            issues = issues.len(),
            "Evaluated posture"
        );

        PostureAssessment {
            measurements: PostureMeasurements {
                neck_angle,
                shoulder_alignment,
                spine_angle,
                head_offset,
            },
            scores,
            metrics: PostureMetrics {
                neck_angle: neck_angle.round() as u16,
                shoulder_alignment: shoulder_alignment.round() as u8,
                spine_angle: spine_angle.round() as u16,
                overall_score,
                status,
                issues,
            },
        }
    }
}

/// Analyze a frame with the default scoring policy
pub fn analyze(frame: &Frame) -> PostureMetrics {
    PostureAnalyzer::new().analyze(frame)
}
