pub mod geometry;
pub mod posture_analyzer;
pub mod session_tracker;

pub use posture_analyzer::{
    analyze, PostureAnalyzer, PostureAssessment, PostureMeasurements, ScoreBreakdown,
};
pub use session_tracker::{SessionTracker, DEFAULT_SNAPSHOT_INTERVAL_MS};
