//! Posture analysis from pose-estimation keypoints.
//!
//! A pose detector supplies one list of normalized body keypoints per video
//! frame. [`Frame`] validates that list against the detector's
//! [`LandmarkLayout`], [`PostureAnalyzer`] turns it into [`PostureMetrics`]
//! (joint angles, a 0-100 score, a good/fair/poor status and issue messages),
//! and [`SessionTracker`] samples those metrics over a monitoring session.
//!
//! ```
//! use posture_coach_core::{analyze, Frame, Keypoint, PostureStatus};
//!
//! let mut keypoints = vec![Keypoint::new(0.5, 0.5); 33];
//! keypoints[0] = Keypoint::new(0.5, 0.2); // nose
//! keypoints[7] = Keypoint::new(0.45, 0.25); // left ear
//! keypoints[8] = Keypoint::new(0.55, 0.25); // right ear
//! keypoints[11] = Keypoint::new(0.4, 0.4); // left shoulder
//! keypoints[12] = Keypoint::new(0.6, 0.4); // right shoulder
//! keypoints[23] = Keypoint::new(0.4, 0.8); // left hip
//! keypoints[24] = Keypoint::new(0.6, 0.8); // right hip
//!
//! let frame = Frame::new(keypoints)?;
//! let metrics = analyze(&frame);
//! assert_eq!(metrics.overall_score, 100);
//! assert_eq!(metrics.status, PostureStatus::Good);
//! # Ok::<(), posture_coach_core::PostureError>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::ScoringPolicy;
pub use error::{PostureError, Result};
pub use models::{
    AlertKind, BodyPart, Frame, Keypoint, LandmarkLayout, PostureAlert, PostureIssue,
    PostureMetrics, PostureSnapshot, PostureStatus, SessionSummary, TorsoLandmarks, TorsoPoint,
};
pub use services::{
    analyze, PostureAnalyzer, PostureAssessment, PostureMeasurements, ScoreBreakdown,
    SessionTracker,
};
