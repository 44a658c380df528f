//! Error types for radiator activity detection.
//!
//! The detector fails loud: a sample it cannot classify aborts the whole
//! call instead of being skipped or approximated. Empty input and input
//! too short to pass warmup are not errors; they yield no intervals.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by the detection stages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectError {
    /// A sample past warmup has no earlier sample inside its baseline window.
    /// Callers must supply denser data (roughly one sample per 5 minutes).
    #[error("no baseline sample in [{window_start}, {window_end}] for sample at {timestamp}")]
    BaselineLookupFailure {
        timestamp: DateTime<Utc>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    },

    /// Input is not sorted ascending by timestamp.
    #[error("sample {index} at {timestamp} precedes previous sample at {previous}")]
    UnsortedSamples {
        index: usize,
        timestamp: DateTime<Utc>,
        previous: DateTime<Utc>,
    },

    /// A reading is NaN or infinite.
    #[error("non-finite temperature at {timestamp}")]
    NonFiniteTemperature { timestamp: DateTime<Utc> },

    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),
}

impl DetectError {
    /// Timestamp of the offending sample, if the error concerns one.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            DetectError::BaselineLookupFailure { timestamp, .. }
            | DetectError::UnsortedSamples { timestamp, .. }
            | DetectError::NonFiniteTemperature { timestamp } => Some(*timestamp),
            DetectError::InvalidConfig(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DetectError>;
