//! Cutline Edit Core — ripple gap removal and anchor reframing
//!
//! Drives a `TimelineHost` to perform timeline edits:
//! - **Gaps:** Merge clip intervals across all tracks, find the holes, and
//!   ripple every later clip left to close them
//! - **Per-clip gaps:** Frame-accurate closing of the gap after one clip,
//!   keeping linked audio/video in sync
//! - **Reframe:** Scale to cover and pan toward one of nine anchors
//! - **Crop:** Approximate an edge crop with zoom and recentring
//!
//! Pure computation plus explicit host calls; no I/O. Every operation
//! returns an `EditResult`, and `Outcome` wraps one for callers that need a
//! `{success, error, data}` envelope.

pub mod consolidate;
pub mod crop;
pub mod error;
pub mod gaps;
pub mod intervals;
pub mod outcome;
pub mod per_clip;
pub mod reframe;
pub mod ripple;
pub mod source_probe;
mod target;
pub mod transform_space;

pub use consolidate::{ripple_remove_all_gaps, ConsolidationReport};
pub use crop::{crop_clip, CropParams, CropReport};
pub use error::{EditError, EditResult};
pub use gaps::{compute_gaps, find_track_gaps, TrackGap, TrackGapReport};
pub use intervals::{collect_intervals, merge_intervals, MERGE_EPSILON};
pub use outcome::{host_changed, Outcome, Summary};
pub use per_clip::{remove_gap_after_clip, GapAfterClipReport, GapClosure};
pub use reframe::{reframe_to_anchor9, ReframeOptions, ReframeReport};
pub use ripple::{ensure_no_locked_tracks, ripple_shift_clips_from};
pub use source_probe::probe_source_size;
pub use target::DEFAULT_SCALE_PCT;
pub use transform_space::{infer_space, TransformSpace};
