use serde::{Deserialize, Serialize};

use crate::config::StatusBands;

/// Quantized posture quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostureStatus {
    Good,
    Fair,
    Poor,
}

impl PostureStatus {
    /// Classify a composite score; each band's lower bound is inclusive
    pub fn from_score(score: u8, bands: &StatusBands) -> Self {
        if score < bands.fair_min {
            PostureStatus::Poor
        } else if score < bands.good_min {
            PostureStatus::Fair
        } else {
            PostureStatus::Good
        }
    }
}

impl std::fmt::Display for PostureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostureStatus::Good => write!(f, "good"),
            PostureStatus::Fair => write!(f, "fair"),
            PostureStatus::Poor => write!(f, "poor"),
        }
    }
}

/// A triggered ergonomic rule; serialized as its user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PostureIssue {
    NeckTiltedForward,
    SpineLeaning,
    ShouldersUneven,
    HeadForward,
}

impl PostureIssue {
    pub fn message(&self) -> &'static str {
        match self {
            PostureIssue::NeckTiltedForward => "Neck tilted forward — adjust screen height",
            PostureIssue::SpineLeaning => "Spine leaning — sit upright",
            PostureIssue::ShouldersUneven => "Shoulders uneven — try to level them",
            PostureIssue::HeadForward => "Head too far forward — pull chin back",
        }
    }

    pub fn all() -> [Self; 4] {
        [
            PostureIssue::NeckTiltedForward,
            PostureIssue::SpineLeaning,
            PostureIssue::ShouldersUneven,
            PostureIssue::HeadForward,
        ]
    }
}

impl std::fmt::Display for PostureIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<PostureIssue> for String {
    fn from(issue: PostureIssue) -> Self {
        issue.message().to_string()
    }
}

impl TryFrom<String> for PostureIssue {
    type Error = String;

    fn try_from(message: String) -> Result<Self, Self::Error> {
        PostureIssue::all()
            .into_iter()
            .find(|issue| issue.message() == message)
            .ok_or_else(|| format!("unknown posture issue: {}", message))
    }
}

/// Posture assessment of a single frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureMetrics {
    /// Angle at the shoulder midpoint between ears and hips, degrees (180 = upright)
    pub neck_angle: u16,
    /// Shoulder levelness, 0-100 (100 = level)
    pub shoulder_alignment: u8,
    /// Torso lean from vertical, degrees (0 = upright)
    pub spine_angle: u16,
    /// Weighted composite score, 0-100
    pub overall_score: u8,
    pub status: PostureStatus,
    /// Triggered rules in evaluation order: neck, spine, shoulders, head
    pub issues: Vec<PostureIssue>,
}

impl PostureMetrics {
    pub fn has_issue(&self, issue: PostureIssue) -> bool {
        self.issues.contains(&issue)
    }

    pub fn issue_messages(&self) -> Vec<&'static str> {
        self.issues.iter().map(PostureIssue::message).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_boundaries() {
        let bands = StatusBands::default();
        assert_eq!(PostureStatus::from_score(0, &bands), PostureStatus::Poor);
        assert_eq!(PostureStatus::from_score(59, &bands), PostureStatus::Poor);
        assert_eq!(PostureStatus::from_score(60, &bands), PostureStatus::Fair);
        assert_eq!(PostureStatus::from_score(79, &bands), PostureStatus::Fair);
        assert_eq!(PostureStatus::from_score(80, &bands), PostureStatus::Good);
        assert_eq!(PostureStatus::from_score(100, &bands), PostureStatus::Good);
    }

    #[test]
    fn test_custom_status_bands() {
        let bands = StatusBands {
            fair_min: 50,
            good_min: 50,
        };
        assert_eq!(PostureStatus::from_score(49, &bands), PostureStatus::Poor);
        assert_eq!(PostureStatus::from_score(50, &bands), PostureStatus::Good);
    }

    #[test]
    fn test_metrics_serialization() {
        let metrics = PostureMetrics {
            neck_angle: 140,
            shoulder_alignment: 95,
            spine_angle: 3,
            overall_score: 87,
            status: PostureStatus::Good,
            issues: vec![PostureIssue::NeckTiltedForward],
        };

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["status"], "good");
        assert_eq!(json["issues"][0], "Neck tilted forward — adjust screen height");

        let back: PostureMetrics = serde_json::from_value(json).unwrap();
        assert_eq!(back, metrics);
    }

    #[test]
    fn test_unknown_issue_message_is_rejected() {
        let result: Result<PostureIssue, _> = serde_json::from_str("\"Slouching\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_only_neck_message_mentions_neck() {
        let neck_family: Vec<_> = PostureIssue::all()
            .into_iter()
            .filter(|issue| issue.message().contains("Neck"))
            .collect();
        assert_eq!(neck_family, vec![PostureIssue::NeckTiltedForward]);
    }
}
