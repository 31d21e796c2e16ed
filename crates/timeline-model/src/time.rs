//! Time representation: seconds for arithmetic, ticks for frame accuracy.

use serde::{Deserialize, Serialize};

/// Host ticks per second (254,016,000,000 divides evenly by every common
/// frame rate, including the NTSC variants).
pub const TICKS_PER_SECOND: i64 = 254_016_000_000;

/// A point on the sequence time axis, in both float seconds and integer ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub seconds: f64,
    pub ticks: i64,
}

impl TimePoint {
    /// Build a time point from seconds, rounding to the nearest tick.
    pub fn from_seconds(seconds: f64, ticks_per_second: i64) -> Self {
        Self {
            seconds,
            ticks: (seconds * ticks_per_second as f64).round() as i64,
        }
    }

    /// Build a time point from ticks.
    pub fn from_ticks(ticks: i64, ticks_per_second: i64) -> Self {
        Self {
            seconds: ticks as f64 / ticks_per_second as f64,
            ticks,
        }
    }
}

/// Tick resolution and video frame rate of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timebase {
    pub ticks_per_second: i64,
    pub frame_rate: f64,
}

impl Timebase {
    pub fn new(ticks_per_second: i64, frame_rate: f64) -> Self {
        Self {
            ticks_per_second,
            frame_rate,
        }
    }

    /// Both components are positive and finite.
    pub fn is_valid(&self) -> bool {
        self.ticks_per_second > 0 && self.frame_rate.is_finite() && self.frame_rate > 0.0
    }

    /// Duration of one video frame in ticks. Fractional for rates such as 29.97.
    pub fn one_frame_ticks(&self) -> f64 {
        self.ticks_per_second as f64 / self.frame_rate
    }

    pub fn ticks_to_seconds(&self, ticks: f64) -> f64 {
        ticks / self.ticks_per_second as f64
    }
}
