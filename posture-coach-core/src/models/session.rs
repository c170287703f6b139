/// Session telemetry records produced by the session tracker

use serde::{Deserialize, Serialize};

use crate::models::posture::{PostureIssue, PostureMetrics, PostureStatus};

/// A metrics sample taken at the session's snapshot cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureSnapshot {
    pub captured_at_ms: u64,
    pub posture_score: u8,
    pub posture_state: PostureStatus,
    pub neck_angle: u16,
    /// Shoulder alignment score at capture time
    pub shoulder_tilt: u8,
    pub spine_angle: u16,
}

impl PostureSnapshot {
    pub fn from_metrics(captured_at_ms: u64, metrics: &PostureMetrics) -> Self {
        Self {
            captured_at_ms,
            posture_score: metrics.overall_score,
            posture_state: metrics.status,
            neck_angle: metrics.neck_angle,
            shoulder_tilt: metrics.shoulder_alignment,
            spine_angle: metrics.spine_angle,
        }
    }
}

/// Body region an alert is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Neck,
    Shoulder,
    Spine,
    /// Poor posture without a specific triggered rule
    General,
}

impl From<PostureIssue> for AlertKind {
    fn from(issue: PostureIssue) -> Self {
        match issue {
            PostureIssue::NeckTiltedForward | PostureIssue::HeadForward => AlertKind::Neck,
            PostureIssue::ShouldersUneven => AlertKind::Shoulder,
            PostureIssue::SpineLeaning => AlertKind::Spine,
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertKind::Neck => write!(f, "neck"),
            AlertKind::Shoulder => write!(f, "shoulder"),
            AlertKind::Spine => write!(f, "spine"),
            AlertKind::General => write!(f, "general"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureAlert {
    pub raised_at_ms: u64,
    pub alert_type: AlertKind,
    pub message: String,
}

/// End-of-session aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub started_at_ms: u64,
    pub ended_at_ms: u64,
    pub duration_ms: u64,
    pub frames_analyzed: u64,
    pub snapshot_count: usize,
    /// Rounded mean snapshot score; `None` when nothing was sampled
    pub avg_posture_score: Option<u8>,
    /// Share of snapshots classified good, 0-100
    pub good_posture_percent: Option<f64>,
    pub total_alerts: usize,
    pub neck_alerts: usize,
    pub shoulder_alerts: usize,
    pub spine_alerts: usize,
}
