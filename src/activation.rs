//! Activation classification.
//!
//! Marks each sample at which the room is warming fast enough to suggest a
//! running radiator. The signal is a windowed derivative: the rise of a
//! sample over its baseline (see [`crate::baseline`]) compared against a
//! fixed threshold.
//!
//! The threshold is `slope_threshold_per_minute * warmup_minutes`, a fixed
//! rate scaled to the nominal gap. It is not rescaled by the actual minutes
//! between baseline and sample; the baseline window already pins that gap
//! to 15-20 minutes.

use chrono::Duration;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::baseline::BaselineWindow;
use crate::error::{DetectError, Result};
use crate::types::{ActivationPoint, Sample};

/// Upper bound on every `*_minutes` heuristic (one year).
pub const MAX_CONFIG_MINUTES: i64 = 366 * 24 * 60;

/// Minutes as a duration, clamped to `[0, MAX_CONFIG_MINUTES]`.
/// `validate` rejects values outside that range.
pub(crate) fn bounded_minutes(minutes: i64) -> Duration {
    Duration::minutes(minutes.clamp(0, MAX_CONFIG_MINUTES))
}

/// Configuration for activation classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// History required before the first sample is classified (minutes).
    pub warmup_minutes: i64,
    /// Far edge of the baseline window, minutes before the sample.
    pub lag_high_minutes: i64,
    /// Near edge of the baseline window, minutes before the sample.
    pub lag_low_minutes: i64,
    /// Minimum warming rate counted as active (°F per minute).
    pub slope_threshold_per_minute: f64,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            warmup_minutes: 15,
            lag_high_minutes: 20,
            lag_low_minutes: 15,
            slope_threshold_per_minute: 0.007, // 0.105 °F over the warmup gap
        }
    }
}

impl ActivationConfig {
    pub fn warmup(&self) -> Duration {
        bounded_minutes(self.warmup_minutes)
    }

    pub fn baseline_window(&self) -> BaselineWindow {
        BaselineWindow::new(
            bounded_minutes(self.lag_high_minutes),
            bounded_minutes(self.lag_low_minutes),
        )
    }

    /// Minimum rise over baseline (°F) for a sample to count as active.
    pub fn rise_threshold(&self) -> f64 {
        self.slope_threshold_per_minute * self.warmup_minutes as f64
    }

    /// Reject settings the classifier cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.warmup_minutes < 0 {
            return Err(DetectError::InvalidConfig(format!(
                "warmup_minutes must be non-negative, got {}",
                self.warmup_minutes
            )));
        }
        if self.lag_low_minutes <= 0 {
            return Err(DetectError::InvalidConfig(format!(
                "lag_low_minutes must be positive, got {}",
                self.lag_low_minutes
            )));
        }
        if self.warmup_minutes > MAX_CONFIG_MINUTES
            || self.lag_high_minutes > MAX_CONFIG_MINUTES
        {
            return Err(DetectError::InvalidConfig(format!(
                "warmup_minutes ({}) and lag_high_minutes ({}) must not exceed {}",
                self.warmup_minutes, self.lag_high_minutes, MAX_CONFIG_MINUTES
            )));
        }
        if self.lag_high_minutes < self.lag_low_minutes {
            return Err(DetectError::InvalidConfig(format!(
                "lag_high_minutes ({}) is below lag_low_minutes ({})",
                self.lag_high_minutes, self.lag_low_minutes
            )));
        }
        if !self.slope_threshold_per_minute.is_finite() || self.slope_threshold_per_minute < 0.0 {
            return Err(DetectError::InvalidConfig(format!(
                "slope_threshold_per_minute must be finite and non-negative, got {}",
                self.slope_threshold_per_minute
            )));
        }
        Ok(())
    }
}

/// Classifies samples as activation points.
#[derive(Debug, Clone)]
pub struct ActivationClassifier {
    config: ActivationConfig,
    window: BaselineWindow,
    threshold: f64,
}

impl ActivationClassifier {
    /// Create a new classifier with the given configuration.
    pub fn new(config: ActivationConfig) -> Self {
        let window = config.baseline_window();
        let threshold = config.rise_threshold();
        Self {
            config,
            window,
            threshold,
        }
    }

    pub fn config(&self) -> &ActivationConfig {
        &self.config
    }

    /// Classify every sample past warmup.
    ///
    /// `samples` must be sorted ascending. Samples inside the warmup period
    /// are never classified but still serve as baselines. A classified
    /// sample with no baseline aborts the whole call.
    pub fn classify(&self, samples: &[Sample]) -> Result<Vec<ActivationPoint>> {
        let first = match samples.first() {
            Some(first) => first,
            None => return Ok(Vec::new()),
        };
        // Nothing can be old enough to classify if warmup runs past the calendar
        let classify_from = match first.timestamp.checked_add_signed(self.config.warmup()) {
            Some(ts) => ts,
            None => return Ok(Vec::new()),
        };

        // Samples before this index are still warming up
        let start_idx = samples.partition_point(|s| s.timestamp < classify_from);

        let mut points = Vec::new();
        for sample in &samples[start_idx..] {
            if let Some(point) = self.classify_sample(samples, sample)? {
                points.push(point);
            }
        }

        debug!(
            "classified {} of {} samples, {} activation points",
            samples.len() - start_idx,
            samples.len(),
            points.len()
        );

        Ok(points)
    }

    // =========================================================================
    // PRIVATE METHODS
    // =========================================================================

    fn classify_sample(
        &self,
        samples: &[Sample],
        sample: &Sample,
    ) -> Result<Option<ActivationPoint>> {
        let baseline = match self.window.lookup(samples, sample.timestamp) {
            Some(baseline) => baseline,
            None => {
                let (window_start, window_end) = self.window.bounds(sample.timestamp);
                warn!(
                    "baseline lookup failed for sample at {}: no reading between {} and {}",
                    sample.timestamp, window_start, window_end
                );
                return Err(DetectError::BaselineLookupFailure {
                    timestamp: sample.timestamp,
                    window_start,
                    window_end,
                });
            }
        };

        let rise = sample.temperature - baseline.temperature;
        if rise >= self.threshold {
            Ok(Some(ActivationPoint::new(sample.timestamp, baseline.timestamp, rise)))
        } else {
            Ok(None)
        }
    }
}

impl Default for ActivationClassifier {
    fn default() -> Self {
        Self::new(ActivationConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
