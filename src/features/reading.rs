//! Feature Reading - unordered sensor input
//!
//! A reading is whatever subset of the schema the caller managed to
//! collect. Unknown keys are tolerated and ignored at vectorization;
//! missing keys are filled with 0 there as well.

use std::collections::HashMap;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{NIGHT_END_HOUR, NIGHT_START_HOUR};

/// Unordered mapping from feature name to numeric value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureReading(HashMap<String, f64>);

impl FeatureReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a reading from raw sensor values plus a timestamp.
    ///
    /// Derives `hour_of_day` and `is_night`. `motion_trend` must be
    /// computed by the caller from its own history; the core keeps no
    /// aggregation state.
    pub fn from_sensor(
        temperature: f64,
        motion_level: f64,
        sound_level: f64,
        timestamp: &DateTime<Utc>,
        motion_trend: f64,
    ) -> Self {
        let hour = timestamp.hour();
        Self::new()
            .with("temperature", temperature)
            .with("motion_level", motion_level)
            .with("sound_level", sound_level)
            .with("hour_of_day", hour as f64)
            .with("is_night", if is_night_hour(hour) { 1.0 } else { 0.0 })
            .with("motion_trend", motion_trend)
    }
}

impl From<HashMap<String, f64>> for FeatureReading {
    fn from(map: HashMap<String, f64>) -> Self {
        Self(map)
    }
}

/// Night window: 22:00 through 05:59
pub fn is_night_hour(hour: u32) -> bool {
    hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR
}
