//! Show sequence information.

use std::path::PathBuf;

use cutline_edit_core::{collect_intervals, compute_gaps, merge_intervals};
use cutline_timeline_model::TrackKind;

use super::load_host;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let host = load_host(&path)?;
    let seq = host
        .sequence()
        .ok_or_else(|| anyhow::anyhow!("No active sequence"))?;

    println!("Sequence: {}", seq.name);
    println!("  Version: {}", seq.version);
    println!("  Modified: {}", seq.modified_at);
    println!(
        "  Frame: {} @ {}fps ({} ticks/s)",
        seq.frame_size(),
        seq.frame_rate,
        seq.ticks_per_second
    );
    println!();

    for kind in TrackKind::ALL {
        println!("{} tracks:", capitalize(kind.as_str()));
        for (index, track) in seq.tracks(kind).iter().enumerate() {
            let end = track.clips.iter().map(|c| c.end).fold(0.0, f64::max);
            println!(
                "  [{index}] {}: {} clips, ends at {:.3}s{}",
                track.name,
                track.clips.len(),
                end,
                if track.locked { " (locked)" } else { "" }
            );
        }
        println!();
    }

    let merged = merge_intervals(&collect_intervals(&host)?);
    let gaps = compute_gaps(&merged);
    let gap_total: f64 = gaps.iter().map(|g| g.duration()).sum();
    println!("Timeline:");
    println!("  Clips: {}", seq.clip_count());
    println!("  Covered spans: {}", merged.len());
    println!("  Sequence gaps: {} ({:.3}s)", gaps.len(), gap_total);
    if !seq.frame_size().is_valid() {
        println!("  Frame size unavailable; reframe and crop will fail");
    }

    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
