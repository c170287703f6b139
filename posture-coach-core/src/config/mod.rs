pub mod scoring;

pub use scoring::{
    HeadRule, NeckRule, ScoringPolicy, ScoringWeights, ShoulderRule, SpineRule, StatusBands,
};
