//! JSON Lines frame input
//!
//! Each line carries one recorded detector result:
//!
//! ```text
//! {"timestamp_ms": 1200, "landmarks": [{"x": 0.5, "y": 0.2, "visibility": 0.99}, ...]}
//! ```
//!
//! Blank lines are ignored. A record with no landmarks means no body was
//! detected and is skipped quietly; a record whose landmarks fail frame
//! validation is skipped with a warning. Malformed JSON stops the read.

use posture_coach_core::{Frame, Keypoint, LandmarkLayout};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed record on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One line of recorded input
#[derive(Debug, Clone, Deserialize)]
pub struct FrameRecord {
    pub timestamp_ms: u64,
    #[serde(default)]
    pub landmarks: Vec<Keypoint>,
}

/// A validated frame with its capture time
#[derive(Debug, Clone)]
pub struct TimedFrame {
    pub timestamp_ms: u64,
    pub frame: Frame,
}

/// Open a file path, or stdin for "-"
pub fn open(input: &str) -> Result<Box<dyn BufRead>, InputError> {
    if input == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(input)?;
    Ok(Box::new(BufReader::new(file)))
}

/// Iterator over the valid frames of a JSON Lines stream
pub struct FrameReader<R> {
    lines: Lines<R>,
    layout: LandmarkLayout,
    line: usize,
    skipped_empty: usize,
    skipped_invalid: usize,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R, layout: LandmarkLayout) -> Self {
        Self {
            lines: reader.lines(),
            layout,
            line: 0,
            skipped_empty: 0,
            skipped_invalid: 0,
        }
    }

    /// Records without any landmarks
    pub fn skipped_empty(&self) -> usize {
        self.skipped_empty
    }

    /// Records rejected by frame validation
    pub fn skipped_invalid(&self) -> usize {
        self.skipped_invalid
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<TimedFrame, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            if text.trim().is_empty() {
                continue;
            }

            let record: FrameRecord = match serde_json::from_str(&text) {
                Ok(record) => record,
                Err(source) => {
                    return Some(Err(InputError::Malformed {
                        line: self.line,
                        source,
                    }))
                }
            };

            if record.landmarks.is_empty() {
                tracing::debug!(line = self.line, timestamp_ms = record.timestamp_ms, "No body detected");
                self.skipped_empty += 1;
                continue;
            }

            match Frame::with_layout(record.landmarks, self.layout) {
                Ok(frame) => {
                    return Some(Ok(TimedFrame {
                        timestamp_ms: record.timestamp_ms,
                        frame,
                    }))
                }
                Err(e) => {
                    tracing::warn!(
                        line = self.line,
                        timestamp_ms = record.timestamp_ms,
                        error = %e,
                        "Skipping frame"
                    );
                    self.skipped_invalid += 1;
                }
            }
        }
    }
}
