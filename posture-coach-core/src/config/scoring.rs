use serde::{Deserialize, Serialize};

use crate::error::{PostureError, Result};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Thresholds, scale factors and weights used to score a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default)]
    pub neck: NeckRule,

    #[serde(default)]
    pub spine: SpineRule,

    #[serde(default)]
    pub shoulders: ShoulderRule,

    #[serde(default)]
    pub head: HeadRule,

    #[serde(default)]
    pub weights: ScoringWeights,

    #[serde(default)]
    pub status: StatusBands,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeckRule {
    /// Neck angles below this many degrees count as tilted forward
    #[serde(default = "default_neck_min_angle")]
    pub min_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpineRule {
    /// Largest tolerated lean from vertical, in degrees
    #[serde(default = "default_spine_max_angle")]
    pub max_angle: f64,

    /// Score points lost per degree beyond `max_angle`
    #[serde(default = "default_spine_penalty")]
    pub penalty_per_degree: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoulderRule {
    /// Score points lost per unit of normalized vertical shoulder offset
    #[serde(default = "default_shoulder_penalty")]
    pub offset_penalty: f64,

    /// Alignment below this value is reported as uneven
    #[serde(default = "default_shoulder_min_alignment")]
    pub min_alignment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadRule {
    /// Largest tolerated horizontal nose offset from the shoulder midpoint
    #[serde(default = "default_head_max_offset")]
    pub max_offset: f64,

    /// Score points lost per unit of horizontal offset
    #[serde(default = "default_head_penalty")]
    pub offset_penalty: f64,
}

/// Composite score weights; must sum to 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_neck_weight")]
    pub neck: f64,

    #[serde(default = "default_spine_weight")]
    pub spine: f64,

    #[serde(default = "default_shoulder_weight")]
    pub shoulders: f64,

    #[serde(default = "default_head_weight")]
    pub head: f64,
}

/// Score boundaries for the posture status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBands {
    /// Lowest score classified as fair
    #[serde(default = "default_fair_min")]
    pub fair_min: u8,

    /// Lowest score classified as good
    #[serde(default = "default_good_min")]
    pub good_min: u8,
}

// Default value functions
fn default_neck_min_angle() -> f64 {
    150.0
}

fn default_spine_max_angle() -> f64 {
    15.0
}

fn default_spine_penalty() -> f64 {
    5.0
}

fn default_shoulder_penalty() -> f64 {
    500.0
}

fn default_shoulder_min_alignment() -> f64 {
    80.0
}

fn default_head_max_offset() -> f64 {
    0.08
}

fn default_head_penalty() -> f64 {
    400.0
}

fn default_neck_weight() -> f64 {
    0.30
}

fn default_spine_weight() -> f64 {
    0.30
}

fn default_shoulder_weight() -> f64 {
    0.25
}

fn default_head_weight() -> f64 {
    0.15
}

fn default_fair_min() -> u8 {
    60
}

fn default_good_min() -> u8 {
    80
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            neck: NeckRule::default(),
            spine: SpineRule::default(),
            shoulders: ShoulderRule::default(),
            head: HeadRule::default(),
            weights: ScoringWeights::default(),
            status: StatusBands::default(),
        }
    }
}

impl Default for NeckRule {
    fn default() -> Self {
        Self {
            min_angle: default_neck_min_angle(),
        }
    }
}

impl Default for SpineRule {
    fn default() -> Self {
        Self {
            max_angle: default_spine_max_angle(),
            penalty_per_degree: default_spine_penalty(),
        }
    }
}

impl Default for ShoulderRule {
    fn default() -> Self {
        Self {
            offset_penalty: default_shoulder_penalty(),
            min_alignment: default_shoulder_min_alignment(),
        }
    }
}

impl Default for HeadRule {
    fn default() -> Self {
        Self {
            max_offset: default_head_max_offset(),
            offset_penalty: default_head_penalty(),
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            neck: default_neck_weight(),
            spine: default_spine_weight(),
            shoulders: default_shoulder_weight(),
            head: default_head_weight(),
        }
    }
}

impl Default for StatusBands {
    fn default() -> Self {
        Self {
            fair_min: default_fair_min(),
            good_min: default_good_min(),
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.neck + self.spine + self.shoulders + self.head
    }
}

impl ScoringPolicy {
    /// Check that every factor is usable and the weights form a convex combination
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("neck.min_angle", self.neck.min_angle),
            ("spine.max_angle", self.spine.max_angle),
            ("spine.penalty_per_degree", self.spine.penalty_per_degree),
            ("shoulders.offset_penalty", self.shoulders.offset_penalty),
            ("shoulders.min_alignment", self.shoulders.min_alignment),
            ("head.max_offset", self.head.max_offset),
            ("head.offset_penalty", self.head.offset_penalty),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PostureError::InvalidPolicy(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        let weights = [
            ("weights.neck", self.weights.neck),
            ("weights.spine", self.weights.spine),
            ("weights.shoulders", self.weights.shoulders),
            ("weights.head", self.weights.head),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(PostureError::InvalidPolicy(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PostureError::InvalidPolicy(format!(
                "weights must sum to 1.0, got {}",
                sum
            )));
        }

        if self.status.fair_min > self.status.good_min || self.status.good_min > 100 {
            return Err(PostureError::InvalidPolicy(format!(
                "status bands must satisfy fair_min <= good_min <= 100, got {} and {}",
                self.status.fair_min, self.status.good_min
            )));
        }

        Ok(())
    }
}
