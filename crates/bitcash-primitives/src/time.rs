//! Block timestamps
//!
//! The node renders timestamps in UTC without a zone suffix:
//! `2024-05-01T12:00:00.500` for [`TimePoint`] and `2024-05-01T12:00:00`
//! for [`TimePointSec`]. Parsing also accepts a trailing `Z`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};

use crate::PrimitiveError;

fn parse_naive(s: &str) -> Result<NaiveDateTime, PrimitiveError> {
    let trimmed = s.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| PrimitiveError::InvalidTime(s.to_string()))
}

/// Microseconds since the Unix epoch
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Debug)]
pub struct TimePoint(i64);

impl TimePoint {
    /// Create from microseconds since epoch
    pub const fn from_micros(micros: i64) -> Self {
        TimePoint(micros)
    }

    /// Microseconds since epoch
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Milliseconds since epoch
    pub const fn millis(&self) -> i64 {
        self.0 / 1000
    }

    /// Current wall-clock time
    pub fn now() -> Self {
        TimePoint(chrono::Utc::now().timestamp_micros())
    }
}

impl FromStr for TimePoint {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TimePoint(parse_naive(s)?.and_utc().timestamp_micros()))
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt = DateTime::from_timestamp_micros(self.0).ok_or(fmt::Error)?;
        write!(f, "{}", dt.naive_utc().format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

serde_via_string!(TimePoint, "a timestamp such as \"2024-01-01T00:00:00.000\"");

/// Seconds since the Unix epoch
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Debug)]
pub struct TimePointSec(u32);

impl TimePointSec {
    /// Create from seconds since epoch
    pub const fn from_secs(secs: u32) -> Self {
        TimePointSec(secs)
    }

    /// Seconds since epoch
    pub const fn secs(&self) -> u32 {
        self.0
    }

    /// Add a number of seconds, saturating at the type's range
    pub fn saturating_add(self, secs: u32) -> Self {
        TimePointSec(self.0.saturating_add(secs))
    }
}

impl From<TimePoint> for TimePointSec {
    fn from(tp: TimePoint) -> Self {
        TimePointSec(tp.0.div_euclid(1_000_000).clamp(0, u32::MAX as i64) as u32)
    }
}

impl FromStr for TimePointSec {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let secs = parse_naive(s)?.and_utc().timestamp();
        u32::try_from(secs)
            .map(TimePointSec)
            .map_err(|_| PrimitiveError::InvalidTime(s.to_string()))
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt = DateTime::from_timestamp(self.0 as i64, 0).ok_or(fmt::Error)?;
        write!(f, "{}", dt.naive_utc().format("%Y-%m-%dT%H:%M:%S"))
    }
}

serde_via_string!(TimePointSec, "a timestamp such as \"2024-01-01T00:00:00\"");
