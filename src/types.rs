//! Core data types for the radiator activity detector.
//!
//! This module defines the fundamental types passed between the detection
//! stages. Every stage consumes and produces these types; raw tuples never
//! cross a module boundary.
//!
//! Design principle: Types should make intent obvious. A temperature reading
//! is a `Sample`, a classified reading is an `ActivationPoint`, and an
//! inferred heater-on period is an `Interval`.
//!
//! Timestamps are UTC instants. Converting them into a display timezone is
//! the caller's concern.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single temperature observation.
///
/// This is the only input contract: an instant and a reading in degrees
/// Fahrenheit. Samples are never mutated once read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// When the reading was taken (UTC).
    pub timestamp: DateTime<Utc>,

    /// Temperature in degrees Fahrenheit.
    pub temperature: f64,
}

impl Sample {
    /// Creates a new sample.
    ///
    /// Assumptions:
    /// - timestamps are non-decreasing within a sequence
    /// - temperature is a finite reading
    pub fn new(timestamp: DateTime<Utc>, temperature: f64) -> Self {
        Self {
            timestamp,
            temperature,
        }
    }
}

/// A sample timestamp classified as "heater actively warming the space".
///
/// Carries the evidence that produced the classification so callers can
/// inspect borderline decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationPoint {
    /// Timestamp of the classified sample.
    pub timestamp: DateTime<Utc>,
    /// Timestamp of the baseline sample it was compared against.
    pub baseline_timestamp: DateTime<Utc>,
    /// Observed rise over the baseline (°F).
    pub rise: f64,
}

impl ActivationPoint {
    pub fn new(timestamp: DateTime<Utc>, baseline_timestamp: DateTime<Utc>, rise: f64) -> Self {
        Self {
            timestamp,
            baseline_timestamp,
            rise,
        }
    }
}

/// An inferred heater-on period.
///
/// Both endpoints are real observed activation timestamps and both are
/// inclusive. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Create a new interval. Endpoints are swapped if given out of order.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Span from first to last activation.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Inclusive membership test: `start <= ts <= end`.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// True if the two closed intervals share at least one instant.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Flag every sample that falls inside one of `intervals`.
///
/// Both inputs must be sorted ascending and `intervals` non-overlapping, as
/// returned by the detector. Runs as a single forward merge.
pub fn activity_flags(samples: &[Sample], intervals: &[Interval]) -> Vec<bool> {
    let mut flags = Vec::with_capacity(samples.len());
    let mut idx = 0;

    for sample in samples {
        while idx < intervals.len() && intervals[idx].end < sample.timestamp {
            idx += 1;
        }
        flags.push(idx < intervals.len() && intervals[idx].contains(sample.timestamp));
    }

    flags
}

/// Sum of the spans of all intervals.
pub fn total_active(intervals: &[Interval]) -> Duration {
    intervals
        .iter()
        .fold(Duration::zero(), |acc, interval| acc + interval.duration())
}

// ============================================================================
// TESTS
// ============================================================================
