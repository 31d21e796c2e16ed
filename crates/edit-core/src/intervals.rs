//! Interval collection and merging across every track of a sequence.

use cutline_timeline_model::{Interval, TimelineHost, TrackKind};

use crate::error::EditResult;

/// Merge tolerance in seconds. Absorbs float/tick rounding noise and treats
/// touching clips as contiguous.
pub const MERGE_EPSILON: f64 = 1e-9;

/// Sort intervals by start and merge every pair where
/// `next.start <= current.end + MERGE_EPSILON`.
///
/// The output is the minimal sorted, non-overlapping cover of the input.
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return vec![];
    };

    let mut merged = Vec::new();
    let mut current = first;
    for next in iter {
        if next.start <= current.end + MERGE_EPSILON {
            if next.end > current.end {
                current.end = next.end;
            }
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}

/// One interval per non-empty clip across all video and audio tracks.
pub fn collect_intervals(host: &dyn TimelineHost) -> EditResult<Vec<Interval>> {
    let mut intervals = Vec::new();
    for kind in TrackKind::ALL {
        for track in 0..host.track_count(kind) {
            intervals.extend(
                host.clips(kind, track)?
                    .iter()
                    .filter(|c| !c.is_empty())
                    .map(|c| c.interval()),
            );
        }
    }
    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_timeline_model::{FrameSize, MemoryHost, SequenceSnapshot};
    use proptest::prelude::*;

    fn iv(start: f64, end: f64) -> Interval {
        Interval::new(start, end)
    }

    #[test]
    fn test_empty_and_single() {
        assert!(merge_intervals(&[]).is_empty());
        assert_eq!(merge_intervals(&[iv(2.0, 4.0)]), vec![iv(2.0, 4.0)]);
    }

    #[test]
    fn test_adjacent_and_overlapping_merge() {
        let merged = merge_intervals(&[iv(12.0, 15.0), iv(5.0, 10.0), iv(0.0, 5.0)]);
        assert_eq!(merged, vec![iv(0.0, 10.0), iv(12.0, 15.0)]);

        let merged = merge_intervals(&[iv(0.0, 10.0), iv(2.0, 3.0), iv(9.0, 11.0)]);
        assert_eq!(merged, vec![iv(0.0, 11.0)]);
    }

    #[test]
    fn test_rounding_noise_is_absorbed() {
        let merged = merge_intervals(&[iv(0.0, 1.0 / 3.0), iv(0.333_333_333_5, 1.0)]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_collect_skips_zero_length_clips() {
        let mut seq = SequenceSnapshot::new("Edit", FrameSize::new(1920, 1080), 25.0);
        seq.add_track(TrackKind::Video, "V1");
        seq.add_track(TrackKind::Audio, "A1");
        seq.add_clip(TrackKind::Video, 0, "a", 0.0, 5.0);
        seq.add_clip(TrackKind::Video, 0, "still", 6.0, 6.0);
        seq.add_clip(TrackKind::Audio, 0, "music", 1.0, 8.0);
        let host = MemoryHost::new(seq);

        let intervals = collect_intervals(&host).unwrap();
        assert_eq!(intervals, vec![iv(0.0, 5.0), iv(1.0, 8.0)]);
    }

    fn covered(intervals: &[Interval], t: f64) -> bool {
        intervals.iter().any(|i| i.contains(t))
    }

    fn arb_intervals() -> impl Strategy<Value = Vec<Interval>> {
        prop::collection::vec((0u32..400, 0u32..60), 0..24).prop_map(|raw| {
            raw.into_iter()
                .map(|(s, d)| iv(s as f64 * 0.25, (s + d) as f64 * 0.25))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_merge_is_sorted_and_disjoint(input in arb_intervals()) {
            let merged = merge_intervals(&input);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].start <= pair[0].end);
                prop_assert!(pair[1].start > pair[0].end + MERGE_EPSILON);
            }
        }

        #[test]
        fn prop_merge_preserves_coverage(input in arb_intervals()) {
            let merged = merge_intervals(&input);
            // Probe on a grid finer than the generator's quarter-second step.
            for step in 0..=(460 * 8) {
                let t = step as f64 * 0.03125;
                prop_assert_eq!(covered(&input, t), covered(&merged, t), "t = {}", t);
            }
        }

        #[test]
        fn prop_merge_is_idempotent(input in arb_intervals()) {
            let once = merge_intervals(&input);
            prop_assert_eq!(merge_intervals(&once), once);
        }
    }
}
