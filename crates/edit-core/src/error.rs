//! Failure taxonomy of the editing engines.

use cutline_common::CutlineError;
use cutline_timeline_model::{HostError, TrackKind};

/// Why an editing operation did not (fully) happen.
///
/// Every variant except `ConsolidationInterrupted` and `Host` is raised
/// before any mutation is issued.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("No active sequence")]
    NoActiveSequence,

    #[error("{kind} track {index} is locked; unlock all tracks before ripple-removing gaps")]
    LockedTrack { kind: TrackKind, index: usize },

    #[error(
        "Crop removes the entire frame (visible fraction x={crop_x:.3}, y={crop_y:.3}); aborting"
    )]
    InvalidCropParameters { crop_x: f64, crop_y: f64 },

    #[error("Clip {clip} on video track {track} has no Motion Scale/Position component")]
    MissingTransformComponent { track: usize, clip: usize },

    #[error("Sequence frame size unavailable")]
    FrameSizeUnavailable,

    #[error("Sequence timebase unavailable (ticks per second or frame rate missing)")]
    TimebaseUnavailable,

    #[error("{kind} track {index} does not exist (sequence has {count})")]
    TrackIndexOutOfRange {
        kind: TrackKind,
        index: usize,
        count: usize,
    },

    #[error("Clip {index} does not exist on {kind} track {track} (track has {count})")]
    ClipIndexOutOfRange {
        kind: TrackKind,
        track: usize,
        index: usize,
        count: usize,
    },

    #[error(
        "Gap consolidation stopped after {gaps_removed} of {gaps_total} gaps \
         ({time_removed:.3}s already removed): {source}"
    )]
    ConsolidationInterrupted {
        gaps_removed: usize,
        gaps_total: usize,
        time_removed: f64,
        source: HostError,
    },

    #[error(transparent)]
    Host(#[from] HostError),
}

impl EditError {
    /// Stable machine-readable name of the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            EditError::NoActiveSequence => "no_active_sequence",
            EditError::LockedTrack { .. } => "locked_track",
            EditError::InvalidCropParameters { .. } => "invalid_crop_parameters",
            EditError::MissingTransformComponent { .. } => "missing_transform_component",
            EditError::FrameSizeUnavailable => "frame_size_unavailable",
            EditError::TimebaseUnavailable => "timebase_unavailable",
            EditError::TrackIndexOutOfRange { .. } | EditError::ClipIndexOutOfRange { .. } => {
                "clip_or_track_index_out_of_range"
            }
            EditError::ConsolidationInterrupted { .. } => "consolidation_interrupted",
            EditError::Host(_) => "host",
        }
    }
}

impl From<EditError> for CutlineError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::InvalidCropParameters { .. }
            | EditError::MissingTransformComponent { .. }
            | EditError::FrameSizeUnavailable => CutlineError::transform(err.to_string()),
            EditError::Host(_) | EditError::ConsolidationInterrupted { .. } => {
                CutlineError::host(err.to_string())
            }
            _ => CutlineError::timeline(err.to_string()),
        }
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_timeline_model::ClipId;

    #[test]
    fn test_messages_carry_values() {
        let err = EditError::LockedTrack {
            kind: TrackKind::Audio,
            index: 3,
        };
        assert!(err.to_string().starts_with("audio track 3 is locked"));

        let err = EditError::InvalidCropParameters {
            crop_x: -0.2,
            crop_y: 1.0,
        };
        assert!(err.to_string().contains("x=-0.200"));
    }

    #[test]
    fn test_interrupted_wraps_host_error() {
        let err = EditError::ConsolidationInterrupted {
            gaps_removed: 1,
            gaps_total: 3,
            time_removed: 2.5,
            source: HostError::ClipNotFound { id: ClipId(4) },
        };
        let msg = err.to_string();
        assert!(msg.contains("after 1 of 3 gaps"));
        assert!(msg.contains("2.500s"));
        assert!(msg.contains("#4"));
    }

    #[test]
    fn test_conversion_to_cutline_error() {
        let err: CutlineError = EditError::FrameSizeUnavailable.into();
        assert!(matches!(err, CutlineError::Transform { .. }));
        let err: CutlineError = EditError::NoActiveSequence.into();
        assert!(matches!(err, CutlineError::Timeline { .. }));
    }
}
