//! List gaps between neighbouring clips on each track.

use std::path::PathBuf;

use cutline_edit_core::{find_track_gaps, Outcome};
use cutline_timeline_model::TrackKind;

use super::load_host;

pub fn run(path: PathBuf, kind: TrackKind, min_gap_secs: f64) -> anyhow::Result<()> {
    let host = load_host(&path)?;

    let outcome = Outcome::from_result(find_track_gaps(&host, kind, min_gap_secs));
    println!("{}", outcome.to_json_pretty()?);

    match outcome.error {
        Some(error) => anyhow::bail!(error),
        None => Ok(()),
    }
}
