//! Baseline lookup.
//!
//! The baseline for a sample is the most recent earlier reading taken
//! between `lag_high` and `lag_low` before it. Comparing against a reading
//! from that far back turns a single temperature into a rise over a fixed
//! gap, which is what the activation stage thresholds.
//!
//! Design: binary search over the sorted slice.
//! - O(log n) per lookup, no per-call state
//! - Correct at any sampling density; sparse data just fails the lookup
//!   instead of silently reaching past the window

use chrono::{DateTime, Duration, Utc};

use crate::types::Sample;

/// A closed window `[ts - lag_high, ts - lag_low]` trailing a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineWindow {
    /// Far edge of the window (how far back it reaches).
    pub lag_high: Duration,
    /// Near edge of the window.
    pub lag_low: Duration,
}

impl BaselineWindow {
    pub fn new(lag_high: Duration, lag_low: Duration) -> Self {
        Self { lag_high, lag_low }
    }

    /// Absolute bounds of the window trailing `ts`, as `(start, end)`.
    ///
    /// Edges reaching before the earliest representable instant are clamped to it.
    pub fn bounds(&self, ts: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let back = |lag: Duration| {
            ts.checked_sub_signed(lag)
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        };
        (back(self.lag_high), back(self.lag_low))
    }

    /// Most recent sample inside the window trailing `ts`.
    ///
    /// `samples` must be sorted ascending. When several samples share the
    /// latest in-window timestamp, the last one in slice order wins.
    pub fn lookup<'a>(&self, samples: &'a [Sample], ts: DateTime<Utc>) -> Option<&'a Sample> {
        let (start, end) = self.bounds(ts);

        // First index past the window's near edge
        let idx = samples.partition_point(|s| s.timestamp <= end);
        if idx == 0 {
            return None;
        }

        let candidate = &samples[idx - 1];
        if candidate.timestamp >= start {
            Some(candidate)
        } else {
            None
        }
    }
}

impl Default for BaselineWindow {
    fn default() -> Self {
        Self {
            lag_high: Duration::minutes(20),
            lag_low: Duration::minutes(15),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, 6, 0, 0, 0).unwrap() + Duration::minutes(minute)
    }

    fn samples_at(minutes: &[i64]) -> Vec<Sample> {
        minutes
            .iter()
            .map(|&m| Sample::new(at(m), 60.0 + m as f64))
            .collect()
    }

    #[test]
    fn test_bounds() {
        let window = BaselineWindow::default();
        let (start, end) = window.bounds(at(30));

        assert_eq!(start, at(10));
        assert_eq!(end, at(15));
    }

    #[test]
    fn test_lookup_picks_most_recent_in_window() {
        let window = BaselineWindow::default();
        let samples = samples_at(&(0..30).collect::<Vec<_>>());

        let baseline = window.lookup(&samples, at(29)).unwrap();
        assert_eq!(baseline.timestamp, at(14));
    }

    #[test]
    fn test_lookup_window_is_closed() {
        let window = BaselineWindow::default();

        // Only the far edge is populated
        let samples = samples_at(&[10, 16, 30]);
        assert_eq!(window.lookup(&samples, at(30)).unwrap().timestamp, at(10));

        // Only the near edge is populated
        let samples = samples_at(&[15, 30]);
        assert_eq!(window.lookup(&samples, at(30)).unwrap().timestamp, at(15));
    }

    #[test]
    fn test_lookup_fails_on_gap() {
        let window = BaselineWindow::default();
        let samples = samples_at(&[0, 9, 16, 30]);

        assert!(window.lookup(&samples, at(30)).is_none());
    }

    #[test]
    fn test_lookup_before_first_sample() {
        let window = BaselineWindow::default();
        let samples = samples_at(&[5, 6, 7]);

        assert!(window.lookup(&samples, at(10)).is_none());
        assert!(window.lookup(&[], at(10)).is_none());
    }

    #[test]
    fn test_lookup_ties_take_last() {
        let window = BaselineWindow::default();
        let samples = vec![
            Sample::new(at(12), 60.0),
            Sample::new(at(12), 61.0),
            Sample::new(at(30), 62.0),
        ];

        let baseline = window.lookup(&samples, at(30)).unwrap();
        assert_eq!(baseline.temperature, 61.0);
    }

    #[test]
    fn test_lookup_ignores_samples_after_window() {
        let window = BaselineWindow::default();
        // Irregular spacing: nothing at exactly 15 minutes back, newer samples ignored
        let samples = vec![
            Sample::new(at(11), 60.0),
            Sample::new(at(13) + Duration::seconds(40), 60.5),
            Sample::new(at(15) + Duration::seconds(1), 70.0),
            Sample::new(at(30), 62.0),
        ];

        let baseline = window.lookup(&samples, at(30)).unwrap();
        assert_eq!(baseline.temperature, 60.5);
    }

    #[test]
    fn test_bounds_clamp_at_earliest_instant() {
        let window = BaselineWindow::default();
        let earliest = DateTime::<Utc>::MIN_UTC;
        let ts = earliest + Duration::minutes(17);

        let (start, end) = window.bounds(ts);
        assert_eq!(start, earliest);
        assert_eq!(end, earliest + Duration::minutes(2));

        let (start, end) = window.bounds(earliest);
        assert_eq!((start, end), (earliest, earliest));
    }
}
