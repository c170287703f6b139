// Library exports for the posture-coach CLI
// This allows testing of internal modules

pub mod commands;
pub mod config;
pub mod input;
