//! Clip handles and track addressing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::time::TimePoint;

/// Media kind of a track (and of every clip placed on it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

impl TrackKind {
    /// Video tracks first, then audio.
    pub const ALL: [TrackKind; 2] = [TrackKind::Video, TrackKind::Audio];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" | "v" => Ok(TrackKind::Video),
            "audio" | "a" => Ok(TrackKind::Audio),
            other => Err(format!("unknown track kind '{other}' (expected video|audio)")),
        }
    }
}

/// Stable host identifier for a clip. Unlike a clip index, it survives moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub u64);

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A read-only view of one clip as the host reported it.
///
/// Only valid until the next mutation: a move may reorder the track, so
/// callers re-query instead of holding on to indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRef {
    pub id: ClipId,
    pub name: String,
    pub kind: TrackKind,
    pub track_index: usize,
    pub start: TimePoint,
    pub end: TimePoint,
}

impl ClipRef {
    /// Time span covered by the clip, in seconds.
    pub fn interval(&self) -> Interval {
        Interval::new(self.start.seconds, self.end.seconds)
    }

    pub fn duration_secs(&self) -> f64 {
        self.end.seconds - self.start.seconds
    }

    /// Zero-length (or inverted) clips cover no time.
    pub fn is_empty(&self) -> bool {
        self.end.seconds <= self.start.seconds
    }
}
