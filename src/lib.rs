//! Radiator Activity Sensing Library
//!
//! Infers when a radiator was running from nothing more than periodic room
//! temperature readings. The output is a list of heater-on intervals that a
//! dashboard can shade behind its temperature chart.
//!
//! # Design Philosophy
//!
//! - **Windowed derivative, not level**: A reading counts as "heating" when it
//!   has risen enough over a baseline taken 15-20 minutes earlier.
//! - **Debounced intervals**: Activation points are merged across short gaps
//!   and kept only when the merged run lasts long enough.
//! - **Fail-loud behavior**: Unsorted input, non-finite readings and samples
//!   with no baseline abort the call. Partial results are never returned.
//! - **Pure**: No I/O and no state kept between calls.
//!
//! # Example
//!
//! ```ignore
//! use chrono::Duration;
//! use radiator_sensing::{detect, Sample};
//!
//! let samples: Vec<Sample> = load_readings();
//! for interval in detect(&samples, Duration::minutes(20))? {
//!     println!("heating from {} to {}", interval.start, interval.end);
//! }
//! ```

pub mod activation;
pub mod baseline;
pub mod clustering;
pub mod detector;
pub mod error;
pub mod requirements;
pub mod types;


// Re-export commonly used types
pub use activation::{ActivationClassifier, ActivationConfig};
pub use clustering::{ClusterConfig, IntervalClusterer};
pub use detector::{detect, Detection, DetectorConfig, RadiatorDetector};
pub use error::{DetectError, Result};
pub use requirements::{HeatingPeriod, HeatingSchedule};
pub use types::{activity_flags, total_active, ActivationPoint, Interval, Sample};
