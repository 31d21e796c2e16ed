//! Whole-sequence ripple gap removal.
//!
//! # Algorithm
//!
//! 1. **Lock check**: refuse to start if any video or audio track is locked.
//! 2. **Collect** one interval per clip across all tracks, **merge** them, and
//!    derive the **gaps** between the merged spans.
//! 3. **Ripple** gaps left to right. Gaps come from the original layout, but
//!    every removal pulls all later clips left, so gap `g` now ends at
//!    `g.end - cumulative` where `cumulative` is the time removed so far.
//!    That corrected end is the pivot of the shift.
//!
//! Removal is not transactional: if the host rejects a move while handling
//! gap `k`, gaps `0..k` stay removed and the error says how far it got.

use serde::Serialize;

use cutline_timeline_model::{Gap, TimelineHost};

use crate::error::{EditError, EditResult};
use crate::gaps::compute_gaps;
use crate::intervals::{collect_intervals, merge_intervals};
use crate::outcome::Summary;
use crate::ripple::{ensure_no_locked_tracks, ripple_shift_clips_from};

/// Result of `ripple_remove_all_gaps`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidationReport {
    pub gaps_removed: usize,
    /// Seconds removed, equal to the sum of gap durations.
    pub total_time_removed: f64,
    /// Gaps as found in the original layout.
    pub gaps: Vec<Gap>,
    /// Clip moves issued to the host.
    pub clips_moved: usize,
    pub clips_found: usize,
}

impl Summary for ConsolidationReport {
    fn summary(&self) -> String {
        if self.clips_found == 0 {
            "No clips found".to_string()
        } else if self.gaps_removed == 0 {
            "No gaps found".to_string()
        } else {
            format!(
                "Removed {} gaps ({:.3}s) across all tracks",
                self.gaps_removed, self.total_time_removed
            )
        }
    }

    fn changed(&self) -> bool {
        self.gaps_removed > 0
    }
}

/// Close every gap in the active sequence, keeping all tracks in sync.
pub fn ripple_remove_all_gaps(host: &mut dyn TimelineHost) -> EditResult<ConsolidationReport> {
    if !host.has_active_sequence() {
        return Err(EditError::NoActiveSequence);
    }
    ensure_no_locked_tracks(&*host)?;

    let intervals = collect_intervals(&*host)?;
    let merged = merge_intervals(&intervals);
    let gaps = compute_gaps(&merged);

    let mut report = ConsolidationReport {
        gaps_removed: 0,
        total_time_removed: 0.0,
        gaps: gaps.clone(),
        clips_moved: 0,
        clips_found: intervals.len(),
    };
    if gaps.is_empty() {
        tracing::info!(clips = intervals.len(), "No gaps to remove");
        return Ok(report);
    }

    tracing::info!(
        clips = intervals.len(),
        spans = merged.len(),
        gaps = gaps.len(),
        "Removing gaps"
    );

    let mut cumulative = 0.0;
    for gap in &gaps {
        let duration = gap.duration();
        let pivot = gap.end - cumulative;
        match ripple_shift_clips_from(host, pivot, -duration) {
            Ok(moved) => report.clips_moved += moved,
            Err(source) => {
                tracing::warn!(
                    error = %source,
                    gaps_removed = report.gaps_removed,
                    time_removed = cumulative,
                    "Gap consolidation interrupted"
                );
                return Err(EditError::ConsolidationInterrupted {
                    gaps_removed: report.gaps_removed,
                    gaps_total: gaps.len(),
                    time_removed: cumulative,
                    source,
                });
            }
        }
        cumulative += duration;
        report.gaps_removed += 1;
        tracing::debug!(
            gap_start = gap.start,
            gap_end = gap.end,
            pivot,
            cumulative,
            "Removed gap"
        );
    }

    report.total_time_removed = cumulative;
    tracing::info!(
        gaps_removed = report.gaps_removed,
        total_time_removed = report.total_time_removed,
        "Gap consolidation complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_timeline_model::{
        ClipId, ClipRef, FrameSize, HostError, MemoryHost, PropertyValue, SequenceSnapshot,
        SourceDescriptor, Timebase, TrackKind,
    };
    use proptest::prelude::*;

    fn starts(host: &MemoryHost, kind: TrackKind, track: usize) -> Vec<f64> {
        host.clips(kind, track)
            .unwrap()
            .iter()
            .map(|c| c.start.seconds)
            .collect()
    }

    /// Two tracks, one shared 3s gap at {7, 10}.
    fn single_gap_host() -> MemoryHost {
        let mut seq = SequenceSnapshot::new("Edit", FrameSize::new(1920, 1080), 25.0);
        seq.add_track(TrackKind::Video, "V1");
        seq.add_track(TrackKind::Audio, "A1");
        let v1 = seq.add_clip(TrackKind::Video, 0, "a", 0.0, 7.0);
        let a1 = seq.add_clip(TrackKind::Audio, 0, "a", 0.0, 7.0);
        let v2 = seq.add_clip(TrackKind::Video, 0, "b", 10.0, 14.0);
        let a2 = seq.add_clip(TrackKind::Audio, 0, "b", 10.0, 14.0);
        seq.add_clip(TrackKind::Audio, 0, "c", 14.0, 16.0);
        seq.link("a", &[v1, a1]);
        seq.link("b", &[v2, a2]);
        MemoryHost::new(seq)
    }

    #[test]
    fn test_single_shared_gap() {
        let mut host = single_gap_host();
        let report = ripple_remove_all_gaps(&mut host).unwrap();

        assert_eq!(report.gaps_removed, 1);
        assert!((report.total_time_removed - 3.0).abs() < 1e-9);
        assert_eq!(starts(&host, TrackKind::Video, 0), vec![0.0, 7.0]);
        assert_eq!(starts(&host, TrackKind::Audio, 0), vec![0.0, 7.0, 11.0]);
        assert_eq!(report.summary(), "Removed 1 gaps (3.000s) across all tracks");
        assert!(report.changed());
    }

    #[test]
    fn test_gap_on_one_track_is_not_a_sequence_gap() {
        let mut seq = SequenceSnapshot::new("Edit", FrameSize::new(1920, 1080), 25.0);
        seq.add_track(TrackKind::Video, "V1");
        seq.add_track(TrackKind::Audio, "A1");
        seq.add_clip(TrackKind::Video, 0, "a", 0.0, 3.0);
        seq.add_clip(TrackKind::Video, 0, "b", 5.0, 8.0);
        seq.add_clip(TrackKind::Audio, 0, "music", 0.0, 8.0);
        let mut host = MemoryHost::new(seq);

        let report = ripple_remove_all_gaps(&mut host).unwrap();
        assert_eq!(report.gaps_removed, 0);
        assert_eq!(report.summary(), "No gaps found");
        assert!(!report.changed());
        assert_eq!(starts(&host, TrackKind::Video, 0), vec![0.0, 5.0]);
    }

    #[test]
    fn test_multiple_gaps_use_corrected_pivots() {
        let mut seq = SequenceSnapshot::new("Edit", FrameSize::new(1920, 1080), 25.0);
        seq.add_track(TrackKind::Video, "V1");
        seq.add_track(TrackKind::Video, "V2");
        seq.add_clip(TrackKind::Video, 0, "a", 0.0, 2.0);
        seq.add_clip(TrackKind::Video, 0, "b", 4.0, 5.0);
        seq.add_clip(TrackKind::Video, 1, "c", 4.5, 6.0);
        seq.add_clip(TrackKind::Video, 0, "d", 9.0, 10.0);
        seq.add_clip(TrackKind::Video, 1, "e", 12.0, 13.0);
        let mut host = MemoryHost::new(seq);

        let report = ripple_remove_all_gaps(&mut host).unwrap();
        // Gaps: {2,4} {6,9} {10,12}
        assert_eq!(report.gaps_removed, 3);
        assert!((report.total_time_removed - 7.0).abs() < 1e-9);
        assert_eq!(starts(&host, TrackKind::Video, 0), vec![0.0, 2.0, 4.0]);
        assert_eq!(starts(&host, TrackKind::Video, 1), vec![2.5, 5.0]);
    }

    #[test]
    fn test_empty_sequence() {
        let mut seq = SequenceSnapshot::new("Edit", FrameSize::new(1920, 1080), 25.0);
        seq.add_track(TrackKind::Video, "V1");
        let mut host = MemoryHost::new(seq);
        let report = ripple_remove_all_gaps(&mut host).unwrap();
        assert_eq!(report.summary(), "No clips found");
        assert!(!report.changed());
    }

    #[test]
    fn test_locked_track_aborts_before_any_move() {
        let mut host = single_gap_host();
        host.sequence_mut().unwrap().audio_tracks[0].locked = true;
        let err = ripple_remove_all_gaps(&mut host).unwrap_err();
        assert_eq!(
            err,
            EditError::LockedTrack {
                kind: TrackKind::Audio,
                index: 0
            }
        );
        assert_eq!(starts(&host, TrackKind::Video, 0), vec![0.0, 10.0]);
    }

    #[test]
    fn test_no_active_sequence() {
        let mut host = MemoryHost::without_sequence();
        assert_eq!(
            ripple_remove_all_gaps(&mut host),
            Err(EditError::NoActiveSequence)
        );
    }

    /// Delegates to a `MemoryHost` but rejects every move after the first `allowed`.
    struct FlakyHost {
        inner: MemoryHost,
        allowed: usize,
    }

    impl TimelineHost for FlakyHost {
        fn has_active_sequence(&self) -> bool {
            self.inner.has_active_sequence()
        }
        fn track_count(&self, kind: TrackKind) -> usize {
            self.inner.track_count(kind)
        }
        fn is_track_locked(&self, kind: TrackKind, index: usize) -> Result<bool, HostError> {
            self.inner.is_track_locked(kind, index)
        }
        fn clips(&self, kind: TrackKind, index: usize) -> Result<Vec<ClipRef>, HostError> {
            self.inner.clips(kind, index)
        }
        fn move_clip(&mut self, id: ClipId, delta_secs: f64) -> Result<(), HostError> {
            if self.allowed == 0 {
                return Err(HostError::Rejected {
                    message: "simulated host failure".to_string(),
                });
            }
            self.allowed -= 1;
            self.inner.move_clip(id, delta_secs)
        }
        fn linked_items(&self, id: ClipId) -> Result<Vec<ClipRef>, HostError> {
            self.inner.linked_items(id)
        }
        fn frame_size(&self) -> Option<FrameSize> {
            self.inner.frame_size()
        }
        fn timebase(&self) -> Option<Timebase> {
            self.inner.timebase()
        }
        fn read_property(
            &self,
            id: ClipId,
            name: &str,
        ) -> Result<Option<PropertyValue>, HostError> {
            self.inner.read_property(id, name)
        }
        fn write_property(
            &mut self,
            id: ClipId,
            name: &str,
            value: PropertyValue,
        ) -> Result<(), HostError> {
            self.inner.write_property(id, name, value)
        }
        fn source_descriptor(&self, id: ClipId) -> Result<SourceDescriptor, HostError> {
            self.inner.source_descriptor(id)
        }
    }

    #[test]
    fn test_failure_leaves_earlier_gaps_removed() {
        // One clip per span on a single track: gap k shifts exactly (3 - k) clips.
        let mut seq = SequenceSnapshot::new("Edit", FrameSize::new(1920, 1080), 25.0);
        seq.add_track(TrackKind::Video, "V1");
        for (i, start) in [0.0, 3.0, 6.0, 9.0].into_iter().enumerate() {
            seq.add_clip(TrackKind::Video, 0, format!("c{i}"), start, start + 2.0);
        }
        // First gap moves 3 clips; allow one more move into the second gap.
        let mut host = FlakyHost {
            inner: MemoryHost::new(seq),
            allowed: 4,
        };

        let err = ripple_remove_all_gaps(&mut host).unwrap_err();
        match err {
            EditError::ConsolidationInterrupted {
                gaps_removed,
                gaps_total,
                time_removed,
                ..
            } => {
                assert_eq!(gaps_removed, 1);
                assert_eq!(gaps_total, 3);
                assert!((time_removed - 1.0).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Gap 0 is closed; gap 1 was half applied (one clip moved) and stays that way.
        assert_eq!(
            starts(&host.inner, TrackKind::Video, 0),
            vec![0.0, 2.0, 4.0, 8.0]
        );
    }

    proptest! {
        #[test]
        fn prop_consolidation_conserves_time(
            layout in prop::collection::vec(
                prop::collection::vec((0u32..200, 1u32..20), 0..6),
                1..4,
            )
        ) {
            let mut seq = SequenceSnapshot::new("Edit", FrameSize::new(1920, 1080), 25.0);
            for (ti, clips) in layout.iter().enumerate() {
                let kind = if ti % 2 == 0 { TrackKind::Video } else { TrackKind::Audio };
                let track = seq.add_track(kind, format!("T{ti}"));
                // Lay clips end to end with generated gaps so a track never overlaps itself.
                let mut cursor = 0.0;
                for (gap, len) in clips {
                    let start = cursor + *gap as f64 * 0.1;
                    let end = start + *len as f64 * 0.1;
                    seq.add_clip(kind, track, "clip", start, end);
                    cursor = end;
                }
            }
            let old_end = seq.last_clip_end();
            let merged = merge_intervals(&collect_intervals(&MemoryHost::new(seq.clone())).unwrap());
            let expected: f64 = compute_gaps(&merged).iter().map(Gap::duration).sum();

            let mut host = MemoryHost::new(seq);
            let report = ripple_remove_all_gaps(&mut host).unwrap();
            let new_end = host.sequence().unwrap().last_clip_end();

            prop_assert!((report.total_time_removed - expected).abs() < 1e-6);
            if let (Some(old), Some(new)) = (old_end, new_end) {
                prop_assert!((old - new - report.total_time_removed).abs() < 1e-6);
            }

            let after = merge_intervals(&collect_intervals(&host).unwrap());
            prop_assert!(compute_gaps(&after).iter().all(|g| g.duration() < 1e-6));
        }
    }
}
