//! Gap detection: between merged intervals, and per track between clips.

use serde::Serialize;

use cutline_timeline_model::{Gap, Interval, TimelineHost, TrackKind};

use crate::error::{EditError, EditResult};
use crate::outcome::Summary;

/// Gaps between consecutive merged intervals.
///
/// Input must already be sorted and non-overlapping (see `merge_intervals`).
/// Nothing is emitted before the first or after the last interval.
pub fn compute_gaps(merged: &[Interval]) -> Vec<Gap> {
    merged
        .windows(2)
        .filter(|pair| pair[1].start > pair[0].end)
        .map(|pair| Gap {
            start: pair[0].end,
            end: pair[1].start,
        })
        .collect()
}

/// A gap between two neighbouring clips on one track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackGap {
    pub kind: TrackKind,
    pub track_index: usize,
    pub track_clip_before: usize,
    pub clip_before_name: String,
    pub clip_after_name: String,
    pub gap: Gap,
}

/// Per-track gap listing for one track kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackGapReport {
    pub kind: TrackKind,
    pub min_gap_secs: f64,
    pub gaps: Vec<TrackGap>,
}

impl Summary for TrackGapReport {
    fn summary(&self) -> String {
        format!("Found {} gaps in {} tracks", self.gaps.len(), self.kind)
    }

    fn changed(&self) -> bool {
        false
    }
}

/// List, track by track, every gap of at least `min_gap_secs` between
/// neighbouring clips. Read-only; unlike `compute_gaps` each track is
/// considered on its own.
pub fn find_track_gaps(
    host: &dyn TimelineHost,
    kind: TrackKind,
    min_gap_secs: f64,
) -> EditResult<TrackGapReport> {
    if !host.has_active_sequence() {
        return Err(EditError::NoActiveSequence);
    }

    let mut gaps = Vec::new();
    for track in 0..host.track_count(kind) {
        let clips = host.clips(kind, track)?;
        for (i, pair) in clips.windows(2).enumerate() {
            let (before, after) = (&pair[0], &pair[1]);
            let duration = after.start.seconds - before.end.seconds;
            if duration > 0.0 && duration >= min_gap_secs {
                gaps.push(TrackGap {
                    kind,
                    track_index: track,
                    track_clip_before: i,
                    clip_before_name: before.name.clone(),
                    clip_after_name: after.name.clone(),
                    gap: Gap {
                        start: before.end.seconds,
                        end: after.start.seconds,
                    },
                });
            }
        }
    }

    tracing::debug!(kind = %kind, min_gap_secs, found = gaps.len(), "Listed track gaps");

    Ok(TrackGapReport {
        kind,
        min_gap_secs,
        gaps,
    })
}
