use thiserror::Error;

use crate::models::frame::TorsoPoint;

/// Errors raised at the analyzer's input and configuration boundaries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PostureError {
    #[error("Invalid frame: expected at least {required} keypoints, got {actual}")]
    InvalidFrame { required: usize, actual: usize },
    #[error("Invalid frame: {part} has a non-finite coordinate")]
    NonFiniteKeypoint { part: TorsoPoint },
    #[error("Invalid frame: {part} lies outside the normalized image range")]
    KeypointOutOfRange { part: TorsoPoint },
    #[error("Invalid scoring policy: {0}")]
    InvalidPolicy(String),
    #[error("Snapshot interval must be greater than zero")]
    InvalidInterval,
}

pub type Result<T> = std::result::Result<T, PostureError>;
