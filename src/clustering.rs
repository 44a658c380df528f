//! Interval clustering.
//!
//! Merges activation timestamps into heater-on intervals with a debounce
//! policy driven by a single `timeout`:
//! - consecutive points no more than `timeout` apart belong to one run
//! - a run is kept only if its span from first to last point reaches `timeout`
//!
//! Design: single forward merge, O(n)
//! - Track the open run, extend it while the gap to the next point fits
//! - Flush and check the span when a gap is too wide, and at the end
//!
//! The final activation point never opens an interval on its own; a run
//! that starts there is dropped regardless of `timeout`. Points already
//! inside an emitted interval are never reused, so emitted intervals are
//! strictly increasing and disjoint.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::activation::{bounded_minutes, MAX_CONFIG_MINUTES};
use crate::error::{DetectError, Result};
use crate::types::Interval;

/// Configuration for interval clustering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Maximum gap bridged between activation points, and minimum span of
    /// an emitted interval (minutes).
    pub timeout_minutes: i64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self { timeout_minutes: 20 }
    }
}

impl ClusterConfig {
    pub fn timeout(&self) -> Duration {
        bounded_minutes(self.timeout_minutes)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_CONFIG_MINUTES).contains(&self.timeout_minutes) {
            return Err(DetectError::InvalidConfig(format!(
                "timeout_minutes must be within 0..={}, got {}",
                MAX_CONFIG_MINUTES, self.timeout_minutes
            )));
        }
        Ok(())
    }
}

/// Groups sorted activation timestamps into intervals.
#[derive(Debug, Clone, Copy)]
pub struct IntervalClusterer {
    timeout: Duration,
}

impl IntervalClusterer {
    pub fn new(config: &ClusterConfig) -> Self {
        Self::with_timeout(config.timeout())
    }

    /// Clusterer with an arbitrary (non-negative) timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Cluster activation timestamps, sorted ascending, into intervals.
    pub fn cluster(&self, points: &[DateTime<Utc>]) -> Vec<Interval> {
        let mut intervals = Vec::new();
        if points.len() < 2 {
            return intervals;
        }

        let mut run_start = 0;
        let mut run_end = points[0];

        for (idx, &point) in points.iter().enumerate().skip(1) {
            if point - run_end > self.timeout {
                self.flush(points, run_start, run_end, &mut intervals);
                run_start = idx;
            }
            run_end = point;
        }
        self.flush(points, run_start, run_end, &mut intervals);

        intervals
    }

    // =========================================================================
    // PRIVATE METHODS
    // =========================================================================

    fn flush(
        &self,
        points: &[DateTime<Utc>],
        run_start: usize,
        run_end: DateTime<Utc>,
        intervals: &mut Vec<Interval>,
    ) {
        // The last point cannot open an interval
        if run_start == points.len() - 1 {
            return;
        }

        let start = points[run_start];
        if run_end - start >= self.timeout {
            intervals.push(Interval::new(start, run_end));
        }
    }
}

impl Default for IntervalClusterer {
    fn default() -> Self {
        Self::new(&ClusterConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
