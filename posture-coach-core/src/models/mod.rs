pub mod frame;
pub mod keypoint;
pub mod posture;
pub mod session;

pub use frame::{Frame, LandmarkLayout, TorsoLandmarks, TorsoPoint};
pub use keypoint::{BodyPart, Keypoint};
pub use posture::{PostureIssue, PostureMetrics, PostureStatus};
pub use session::{AlertKind, PostureAlert, PostureSnapshot, SessionSummary};
