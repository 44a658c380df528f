//! Radiator interval detector integrating both detection stages.
//!
//! This module orchestrates the full data flow from raw temperature samples
//! through activation classification and interval clustering to the final
//! list of heater-on intervals.
//!
//! # Architecture
//!
//! 1. **Validation**: Reject unsorted input and non-finite readings
//! 2. **Activation**: Classify samples past warmup against their baseline
//! 3. **Clustering**: Merge activation points into debounced intervals
//!
//! The detector is a pure function of its input: nothing is cached between
//! calls, so one instance can be shared freely across threads.

use chrono::Duration;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::activation::{ActivationClassifier, ActivationConfig};
use crate::clustering::{ClusterConfig, IntervalClusterer};
use crate::error::{DetectError, Result};
use crate::types::{ActivationPoint, Interval, Sample};

/// Configuration for the complete detector.
///
/// Bundles the per-stage configurations so the heuristics can be tuned
/// (or loaded from a file) as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Warmup, baseline window and slope threshold.
    pub activation: ActivationConfig,
    /// Debounce timeout.
    pub clustering: ClusterConfig,
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<()> {
        self.activation.validate()?;
        self.clustering.validate()
    }
}

/// Full output of one detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Every sample classified as active, in time order.
    pub activation_points: Vec<ActivationPoint>,
    /// Inferred heater-on intervals, ascending and disjoint.
    pub intervals: Vec<Interval>,
}

/// Infers heater-on intervals from a sorted temperature series.
#[derive(Debug, Clone)]
pub struct RadiatorDetector {
    classifier: ActivationClassifier,
    clusterer: IntervalClusterer,
}

impl RadiatorDetector {
    /// Create a detector, rejecting unusable configurations.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        let clusterer = IntervalClusterer::new(&config.clustering);
        Ok(Self {
            classifier: ActivationClassifier::new(config.activation),
            clusterer,
        })
    }

    /// Default heuristics with a custom clustering timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        if timeout < Duration::zero() {
            return Err(DetectError::InvalidConfig(format!(
                "timeout must be non-negative, got {}",
                timeout
            )));
        }
        Ok(Self {
            classifier: ActivationClassifier::default(),
            clusterer: IntervalClusterer::with_timeout(timeout),
        })
    }

    /// Infer heater-on intervals.
    pub fn detect(&self, samples: &[Sample]) -> Result<Vec<Interval>> {
        self.analyze(samples).map(|detection| detection.intervals)
    }

    /// Infer heater-on intervals, keeping the activation points behind them.
    pub fn analyze(&self, samples: &[Sample]) -> Result<Detection> {
        validate_samples(samples)?;

        let activation_points = self.classifier.classify(samples)?;
        let timestamps: Vec<_> = activation_points.iter().map(|p| p.timestamp).collect();
        let intervals = self.clusterer.cluster(&timestamps);

        debug!(
            "{} samples -> {} activation points -> {} intervals",
            samples.len(),
            activation_points.len(),
            intervals.len()
        );

        Ok(Detection {
            activation_points,
            intervals,
        })
    }
}

impl Default for RadiatorDetector {
    fn default() -> Self {
        Self {
            classifier: ActivationClassifier::default(),
            clusterer: IntervalClusterer::default(),
        }
    }
}

/// Infer heater-on intervals with the default heuristics and the given
/// clustering `timeout` (20 minutes in the reference tuning).
pub fn detect(samples: &[Sample], timeout: Duration) -> Result<Vec<Interval>> {
    RadiatorDetector::with_timeout(timeout)?.detect(samples)
}

/// Check the sorted-input precondition and reading sanity.
pub fn validate_samples(samples: &[Sample]) -> Result<()> {
    for (index, sample) in samples.iter().enumerate() {
        if !sample.temperature.is_finite() {
            return Err(DetectError::NonFiniteTemperature {
                timestamp: sample.timestamp,
            });
        }
        if index > 0 {
            let previous = samples[index - 1].timestamp;
            if sample.timestamp < previous {
                return Err(DetectError::UnsortedSamples {
                    index,
                    timestamp: sample.timestamp,
                    previous,
                });
            }
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, 6, 0, 0, 0).unwrap() + Duration::minutes(minute)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(DetectorConfig::default().validate().is_ok());
        assert!(RadiatorDetector::new(DetectorConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DetectorConfig {
            clustering: ClusterConfig { timeout_minutes: -5 },
            ..DetectorConfig::default()
        };
        assert!(matches!(
            RadiatorDetector::new(config),
            Err(DetectError::InvalidConfig(_))
        ));
        assert!(RadiatorDetector::with_timeout(Duration::minutes(-1)).is_err());
    }

    #[test]
    fn test_unrepresentable_minutes_rejected() {
        for json in [
            r#"{"clustering": {"timeout_minutes": 9223372036854775807}}"#,
            r#"{"activation": {"lag_high_minutes": 100000000000000}}"#,
            r#"{"activation": {"warmup_minutes": 9223372036854775807}}"#,
        ] {
            let config: DetectorConfig = serde_json::from_str(json).unwrap();
            assert!(
                matches!(RadiatorDetector::new(config), Err(DetectError::InvalidConfig(_))),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_detect_near_earliest_instant() {
        let earliest = DateTime::<Utc>::MIN_UTC;
        let samples: Vec<Sample> = (0..60)
            .map(|m| Sample::new(earliest + Duration::minutes(m), 60.0 + 0.3 * m as f64))
            .collect();

        let intervals = RadiatorDetector::default().detect(&samples).unwrap();

        assert_eq!(
            intervals,
            vec![Interval::new(
                earliest + Duration::minutes(15),
                earliest + Duration::minutes(59)
            )]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(detect(&[], Duration::minutes(20)).unwrap(), vec![]);
    }

    #[test]
    fn test_unsorted_input_rejected() {
        let samples = vec![
            Sample::new(at(0), 60.0),
            Sample::new(at(2), 60.0),
            Sample::new(at(1), 60.0),
        ];

        let err = RadiatorDetector::default().detect(&samples).unwrap_err();
        assert_eq!(
            err,
            DetectError::UnsortedSamples {
                index: 2,
                timestamp: at(1),
                previous: at(2),
            }
        );
        assert_eq!(err.timestamp(), Some(at(1)));
    }

    #[test]
    fn test_non_finite_temperature_rejected() {
        let samples = vec![Sample::new(at(0), 60.0), Sample::new(at(1), f64::NAN)];

        let err = RadiatorDetector::default().detect(&samples).unwrap_err();
        assert_eq!(err, DetectError::NonFiniteTemperature { timestamp: at(1) });
    }

    #[test]
    fn test_analyze_returns_points_and_intervals() {
        let samples: Vec<Sample> = (0..60)
            .map(|m| {
                let temperature = if m > 20 {
                    60.0 + 0.3 * (m - 20) as f64
                } else {
                    60.0
                };
                Sample::new(at(m), temperature)
            })
            .collect();

        let detection = RadiatorDetector::default().analyze(&samples).unwrap();

        assert_eq!(detection.activation_points.len(), 39);
        assert_eq!(detection.intervals, vec![Interval::new(at(21), at(59))]);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{"clustering": {"timeout_minutes": 30}}"#).unwrap();

        assert_eq!(config.clustering.timeout_minutes, 30);
        assert_eq!(config.activation, ActivationConfig::default());
    }
}
