//! Resolving `(track, clip)` indices to a host clip and its Motion values.

use cutline_timeline_model::{
    ClipRef, TimelineHost, TrackKind, POSITION_PROPERTY, SCALE_PROPERTY,
};

use crate::error::{EditError, EditResult};

/// Scale assumed when the host reports none (or zero).
pub const DEFAULT_SCALE_PCT: f64 = 100.0;

/// Clips on `kind` track `track_index`, after checking that both the track
/// and `clip_index` exist.
pub(crate) fn resolve_track_clips(
    host: &dyn TimelineHost,
    kind: TrackKind,
    track_index: usize,
    clip_index: usize,
) -> EditResult<Vec<ClipRef>> {
    let count = host.track_count(kind);
    if track_index >= count {
        return Err(EditError::TrackIndexOutOfRange {
            kind,
            index: track_index,
            count,
        });
    }
    let clips = host.clips(kind, track_index)?;
    if clip_index >= clips.len() {
        return Err(EditError::ClipIndexOutOfRange {
            kind,
            track: track_index,
            index: clip_index,
            count: clips.len(),
        });
    }
    Ok(clips)
}

/// A video clip with its current Motion values.
#[derive(Debug, Clone)]
pub(crate) struct MotionTarget {
    pub clip: ClipRef,
    /// Uniform scale in percent.
    pub scale: f64,
    /// Raw position value; `None` when the host value is not a pair.
    pub position: Option<(f64, f64)>,
}

/// Look up video clip `clip_index` on track `track_index` and read its
/// Scale and Position. Both properties must exist.
pub(crate) fn resolve_motion_target(
    host: &dyn TimelineHost,
    track_index: usize,
    clip_index: usize,
) -> EditResult<MotionTarget> {
    let mut clips = resolve_track_clips(host, TrackKind::Video, track_index, clip_index)?;
    let clip = clips.swap_remove(clip_index);

    let missing = || EditError::MissingTransformComponent {
        track: track_index,
        clip: clip_index,
    };
    let scale = host.read_property(clip.id, SCALE_PROPERTY)?.ok_or_else(missing)?;
    let position = host
        .read_property(clip.id, POSITION_PROPERTY)?
        .ok_or_else(missing)?;

    let scale = scale
        .as_scalar()
        .filter(|s| s.is_finite() && *s != 0.0)
        .unwrap_or(DEFAULT_SCALE_PCT);

    Ok(MotionTarget {
        clip,
        scale,
        position: position.as_pair(),
    })
}
