//! Close the gap after a single clip.

use cutline_edit_core::remove_gap_after_clip;
use cutline_timeline_model::TrackKind;

use super::Target;

pub fn run(target: Target, track: usize, clip: usize, kind: TrackKind) -> anyhow::Result<()> {
    let mut host = target.load_host()?;

    let result = remove_gap_after_clip(&mut host, track, clip, kind);
    target.finish(host, result)
}
