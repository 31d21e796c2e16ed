//! The `TimelineHost` capability contract.
//!
//! Every editing engine talks to the editor through this trait and nothing
//! else: no ambient "current project". Hosts report clips sorted by start
//! time and are free to reorder them after any mutation.

use serde::{Deserialize, Serialize};

use crate::clip::{ClipId, ClipRef, TrackKind};
use crate::geometry::{CoordinateSpace, FrameSize};
use crate::time::Timebase;

/// Display name of the Motion position property.
pub const POSITION_PROPERTY: &str = "Position";

/// Display name of the Motion uniform scale property (percent).
pub const SCALE_PROPERTY: &str = "Scale";

/// Value of a numeric clip property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Scalar(f64),
    Pair(f64, f64),
}

impl PropertyValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            PropertyValue::Scalar(v) => Some(*v),
            PropertyValue::Pair(..) => None,
        }
    }

    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            PropertyValue::Pair(x, y) => Some((*x, *y)),
            PropertyValue::Scalar(_) => None,
        }
    }
}

/// What the host knows about the media behind a clip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Project item name (often the file name).
    pub name: String,
    /// Free-form project metadata text.
    pub metadata: String,
}

/// Failures reported by a host.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("{kind} track {index} does not exist")]
    TrackNotFound { kind: TrackKind, index: usize },

    #[error("clip {id} does not exist")]
    ClipNotFound { id: ClipId },

    #[error("{kind} track {index} is locked; clip {id} cannot be modified")]
    TrackLocked {
        kind: TrackKind,
        index: usize,
        id: ClipId,
    },

    #[error("clip {id} has no '{name}' property")]
    PropertyMissing { id: ClipId, name: String },

    #[error("property '{name}' on clip {id} expects {expected}")]
    PropertyType {
        id: ClipId,
        name: String,
        expected: &'static str,
    },

    #[error("host rejected the operation: {message}")]
    Rejected { message: String },
}

/// Capability set the editing engines need from a timeline editor.
pub trait TimelineHost {
    /// Whether a sequence is open for editing.
    fn has_active_sequence(&self) -> bool;

    /// Number of tracks of the given kind.
    fn track_count(&self, kind: TrackKind) -> usize;

    fn is_track_locked(&self, kind: TrackKind, index: usize) -> Result<bool, HostError>;

    /// Clips on a track, sorted by start time.
    fn clips(&self, kind: TrackKind, index: usize) -> Result<Vec<ClipRef>, HostError>;

    /// Shift a clip along the time axis by `delta_secs` (negative = earlier).
    fn move_clip(&mut self, id: ClipId, delta_secs: f64) -> Result<(), HostError>;

    /// Clips linked to `id` for A/V sync, excluding `id` itself.
    fn linked_items(&self, id: ClipId) -> Result<Vec<ClipRef>, HostError>;

    fn frame_size(&self) -> Option<FrameSize>;

    fn timebase(&self) -> Option<Timebase>;

    /// Read a Motion property; `Ok(None)` when the clip has no such property.
    fn read_property(&self, id: ClipId, name: &str) -> Result<Option<PropertyValue>, HostError>;

    fn write_property(
        &mut self,
        id: ClipId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), HostError>;

    fn source_descriptor(&self, id: ClipId) -> Result<SourceDescriptor, HostError>;

    /// Coordinate space of the position property, when the host can state it.
    fn position_space_hint(&self, _id: ClipId) -> Option<CoordinateSpace> {
        None
    }
}
