//! Legal minimum indoor temperatures.
//!
//! Residential heating law sets a daytime and a nighttime minimum during
//! heating season and nothing outside it. The default schedule encodes the
//! New York City rule: no requirement June through September, 68 °F from
//! 06:00 through 21:59, 62 °F overnight.
//!
//! All lookups take local wall-clock time. Converting sample timestamps into
//! the building's timezone is left to the caller.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Which minimum applies at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatingPeriod {
    Day,
    Night,
}

/// Seasonal day/night heating minimums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatingSchedule {
    /// First month (1-12) with no requirement.
    pub off_season_start_month: u32,
    /// Last month (1-12) with no requirement.
    pub off_season_end_month: u32,
    /// First hour (0-23) of the daytime period.
    pub day_start_hour: u32,
    /// Last hour (0-23) of the daytime period, inclusive.
    pub day_end_hour: u32,
    /// Daytime minimum (°F).
    pub day_minimum_f: f64,
    /// Overnight minimum (°F).
    pub night_minimum_f: f64,
}

impl Default for HeatingSchedule {
    fn default() -> Self {
        Self {
            off_season_start_month: 6,
            off_season_end_month: 9,
            day_start_hour: 6,
            day_end_hour: 21,
            day_minimum_f: 68.0,
            night_minimum_f: 62.0,
        }
    }
}

impl HeatingSchedule {
    /// True if `local` falls in heating season.
    pub fn in_season(&self, local: NaiveDateTime) -> bool {
        let month = local.month();
        !(self.off_season_start_month..=self.off_season_end_month).contains(&month)
    }

    /// Period in effect at `local`, or `None` outside heating season.
    pub fn period_at(&self, local: NaiveDateTime) -> Option<HeatingPeriod> {
        if !self.in_season(local) {
            return None;
        }
        let hour = local.hour();
        if (self.day_start_hour..=self.day_end_hour).contains(&hour) {
            Some(HeatingPeriod::Day)
        } else {
            Some(HeatingPeriod::Night)
        }
    }

    /// Minimum required temperature (°F) at `local`.
    pub fn minimum_at(&self, local: NaiveDateTime) -> Option<f64> {
        self.period_at(local).map(|period| match period {
            HeatingPeriod::Day => self.day_minimum_f,
            HeatingPeriod::Night => self.night_minimum_f,
        })
    }

    /// True if `temperature` is below the minimum in effect at `local`.
    pub fn is_shortfall(&self, local: NaiveDateTime, temperature: f64) -> bool {
        self.minimum_at(local)
            .map_or(false, |minimum| temperature < minimum)
    }
}

// ============================================================================
// TESTS
// ============================================================================
