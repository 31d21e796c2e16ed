//! Closed time intervals and the gaps between them.

use serde::{Deserialize, Serialize};

/// A closed span `[start, end]` on the time axis, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    /// Create an interval; the bounds are swapped if given in reverse.
    pub fn new(start: f64, end: f64) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }
}

/// Empty time strictly between two merged intervals. Always `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub start: f64,
    pub end: f64,
}

impl Gap {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
