//! Ripple shifting: move everything at or after a pivot by one delta.

use cutline_timeline_model::{HostError, TimelineHost, TrackKind};

use crate::error::{EditError, EditResult};
use crate::intervals::MERGE_EPSILON;

/// Fail with `LockedTrack` naming the first locked track, video before audio.
pub fn ensure_no_locked_tracks(host: &dyn TimelineHost) -> EditResult<()> {
    for kind in TrackKind::ALL {
        for index in 0..host.track_count(kind) {
            if host.is_track_locked(kind, index)? {
                return Err(EditError::LockedTrack { kind, index });
            }
        }
    }
    Ok(())
}

/// Move every clip on every track whose start is at or after `pivot_secs`
/// by `delta_secs` (negative pulls clips earlier). Returns how many clips
/// were moved.
///
/// Link groups are not resolved here: every clip is visited on its own
/// track anyway. The caller must have checked track locks; a locked track
/// surfaces as the host's rejection of the first move on it, and moves
/// already issued stay applied.
///
/// Clip starts are compared with `MERGE_EPSILON` slack so that a clip that
/// went through several earlier shifts still matches a pivot computed from
/// the original layout.
pub fn ripple_shift_clips_from(
    host: &mut dyn TimelineHost,
    pivot_secs: f64,
    delta_secs: f64,
) -> Result<usize, HostError> {
    let threshold = pivot_secs - MERGE_EPSILON;
    let mut moved = 0;

    for kind in TrackKind::ALL {
        for track in 0..host.track_count(kind) {
            // Snapshot first: the host may reorder the track after each move.
            let targets: Vec<_> = host
                .clips(kind, track)?
                .into_iter()
                .filter(|c| c.start.seconds >= threshold)
                .map(|c| c.id)
                .collect();
            for id in targets {
                host.move_clip(id, delta_secs)?;
                moved += 1;
            }
        }
    }

    tracing::debug!(pivot_secs, delta_secs, moved, "Ripple shift");
    Ok(moved)
}
