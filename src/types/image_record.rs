use crate::types::config_error::ConfigError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// An image selected for the time-lapse, ordered by timestamp and then path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImageRecord {
    pub timestamp: DateTime<Utc>,
    pub path: PathBuf,
}

/// Inclusive range of epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Result<Self, ConfigError> {
        if start.is_nan() || end.is_nan() {
            return Err(ConfigError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let epoch = epoch_seconds(timestamp);
        self.start <= epoch && epoch <= self.end
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: f64::INFINITY,
        }
    }
}

/// Seconds since the Unix epoch at microsecond resolution.
pub fn epoch_seconds(timestamp: &DateTime<Utc>) -> f64 {
    timestamp.timestamp_micros() as f64 / 1_000_000.0
}
