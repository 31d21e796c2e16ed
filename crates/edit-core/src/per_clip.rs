//! Frame-accurate removal of the gap after one clip.
//!
//! Works in host ticks rather than seconds and leaves exactly one frame of
//! the gap in place, so rounding can never make the moved clip overlap its
//! predecessor.

use serde::Serialize;

use cutline_timeline_model::{ClipRef, HostError, TimelineHost, TrackKind};

use crate::error::{EditError, EditResult};
use crate::outcome::Summary;
use crate::target::resolve_track_clips;

/// What happened to the gap after the target clip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GapClosure {
    /// The clip is the last one on its track.
    LastClip,
    /// The next clip already touches or overlaps the target.
    NoGap { gap_ticks: i64 },
    /// The gap is no larger than the one-frame buffer.
    TooSmall { gap_ticks: i64, one_frame_ticks: f64 },
    /// The next clip and its linked clips were pulled back.
    Closed {
        gap_ticks: i64,
        moved_ticks: f64,
        moved_secs: f64,
        linked_moved: usize,
    },
}

/// Result of `remove_gap_after_clip`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAfterClipReport {
    pub kind: TrackKind,
    pub track_index: usize,
    pub clip_index: usize,
    #[serde(flatten)]
    pub closure: GapClosure,
}

impl Summary for GapAfterClipReport {
    fn summary(&self) -> String {
        match &self.closure {
            GapClosure::LastClip => "No gap to remove - this is the last clip on the track".into(),
            GapClosure::NoGap { .. } => "No gap found between the specified clips".into(),
            GapClosure::TooSmall { .. } => "Gap too small to remove (less than 1 frame)".into(),
            GapClosure::Closed { moved_secs, .. } => format!(
                "Removed {:.3}s gap after {} track {}, clip {}",
                moved_secs, self.kind, self.track_index, self.clip_index
            ),
        }
    }

    fn changed(&self) -> bool {
        matches!(self.closure, GapClosure::Closed { .. })
    }
}

/// Every clip that will move must sit on an unlocked track, so that the
/// clip and its links move together or not at all.
fn ensure_movable(host: &dyn TimelineHost, clips: &[&ClipRef]) -> EditResult<()> {
    for clip in clips {
        if host.is_track_locked(clip.kind, clip.track_index)? {
            return Err(HostError::TrackLocked {
                kind: clip.kind,
                index: clip.track_index,
                id: clip.id,
            }
            .into());
        }
    }
    Ok(())
}

/// Close the gap between clip `clip_index` and the next clip on the same
/// track, keeping one frame of space, and move the next clip's linked
/// clips by the same delta.
pub fn remove_gap_after_clip(
    host: &mut dyn TimelineHost,
    track_index: usize,
    clip_index: usize,
    kind: TrackKind,
) -> EditResult<GapAfterClipReport> {
    if !host.has_active_sequence() {
        return Err(EditError::NoActiveSequence);
    }
    let clips = resolve_track_clips(&*host, kind, track_index, clip_index)?;

    let report = |closure| GapAfterClipReport {
        kind,
        track_index,
        clip_index,
        closure,
    };

    let current = &clips[clip_index];
    let Some(next) = clips.get(clip_index + 1) else {
        return Ok(report(GapClosure::LastClip));
    };

    let timebase = host.timebase().ok_or(EditError::TimebaseUnavailable)?;
    let one_frame_ticks = timebase.one_frame_ticks();

    let gap_ticks = next.start.ticks - current.end.ticks;
    if gap_ticks <= 0 {
        return Ok(report(GapClosure::NoGap { gap_ticks }));
    }

    let moved_ticks = gap_ticks as f64 - one_frame_ticks;
    if moved_ticks <= 0.0 {
        tracing::debug!(gap_ticks, one_frame_ticks, "Gap smaller than one frame");
        return Ok(report(GapClosure::TooSmall {
            gap_ticks,
            one_frame_ticks,
        }));
    }

    let moved_secs = timebase.ticks_to_seconds(moved_ticks);
    let delta = -moved_secs;

    let linked_before = host.linked_items(next.id)?;
    let mut movable: Vec<&ClipRef> = vec![next];
    movable.extend(linked_before.iter().filter(|c| c.id != next.id));
    ensure_movable(&*host, &movable)?;

    host.move_clip(next.id, delta)?;

    // Links are re-queried: the move may have reordered tracks.
    let mut linked_moved = 0;
    for linked in host.linked_items(next.id)? {
        if linked.id == next.id {
            continue;
        }
        host.move_clip(linked.id, delta)?;
        linked_moved += 1;
    }

    tracing::info!(
        kind = %kind,
        track = track_index,
        clip = clip_index,
        gap_ticks,
        moved_ticks,
        moved_secs,
        linked_moved,
        "Removed gap after clip"
    );

    Ok(report(GapClosure::Closed {
        gap_ticks,
        moved_ticks,
        moved_secs,
        linked_moved,
    }))
}
