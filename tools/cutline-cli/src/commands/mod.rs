//! Subcommand implementations.

use std::path::{Path, PathBuf};

use serde::Serialize;

use cutline_edit_core::{host_changed, EditResult, Outcome, Summary};
use cutline_timeline_model::{MemoryHost, SequenceSnapshot};

pub mod close_gap;
pub mod consolidate;
pub mod crop;
pub mod gaps;
pub mod info;
pub mod init_config;
pub mod reframe;

/// Snapshot an editing command reads, and where its result goes.
pub struct Target {
    pub sequence: PathBuf,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

impl Target {
    pub fn new(sequence: PathBuf, output: Option<PathBuf>, dry_run: bool) -> Self {
        Self {
            sequence,
            output,
            dry_run,
        }
    }

    pub fn load_host(&self) -> anyhow::Result<MemoryHost> {
        load_host(&self.sequence)
    }

    /// Print the outcome as JSON and write the snapshot back when the host
    /// was changed. A no-op leaves the file, and its `modified_at`, untouched.
    /// A failed command exits with an error after printing.
    pub fn finish<T: Summary + Serialize>(
        &self,
        host: MemoryHost,
        result: EditResult<T>,
    ) -> anyhow::Result<()> {
        let mutated = host_changed(&result);

        let outcome = Outcome::from_result(result);
        println!("{}", outcome.to_json_pretty()?);

        if mutated && !self.dry_run {
            let path = self.output.as_deref().unwrap_or(&self.sequence);
            let mut snapshot = host
                .into_sequence()
                .ok_or_else(|| anyhow::anyhow!("Host has no sequence to save"))?;
            snapshot
                .save(path)
                .map_err(|e| anyhow::anyhow!("Failed to save sequence: {e}"))?;
            tracing::info!(path = %path.display(), "Saved sequence");
        } else if self.dry_run {
            tracing::info!("Dry run; sequence not written");
        } else {
            tracing::info!("Sequence unchanged; not written");
        }

        match outcome.error {
            Some(error) => anyhow::bail!(error),
            None => Ok(()),
        }
    }
}

pub fn load_host(path: &Path) -> anyhow::Result<MemoryHost> {
    let snapshot =
        SequenceSnapshot::load(path).map_err(|e| anyhow::anyhow!("Failed to load sequence: {e}"))?;
    Ok(MemoryHost::new(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_edit_core::{remove_gap_after_clip, ripple_remove_all_gaps};
    use cutline_timeline_model::{FrameSize, TrackKind};

    fn write_sequence(name: &str, second_start: f64) -> PathBuf {
        let mut seq = SequenceSnapshot::new("Edit", FrameSize::new(1920, 1080), 25.0);
        seq.add_track(TrackKind::Video, "V1");
        seq.add_clip(TrackKind::Video, 0, "a.mp4", 0.0, 2.0);
        seq.add_clip(TrackKind::Video, 0, "b.mp4", second_start, second_start + 2.0);

        let dir = std::env::temp_dir().join(format!("cutline_cli_{name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sequence.json");
        seq.save(&path).unwrap();
        path
    }

    #[test]
    fn test_no_op_leaves_snapshot_untouched() {
        let path = write_sequence("noop", 2.0);
        let before = std::fs::read_to_string(&path).unwrap();

        let target = Target::new(path.clone(), None, false);
        let mut host = target.load_host().unwrap();
        let result = remove_gap_after_clip(&mut host, 0, 0, TrackKind::Video);
        target.finish(host, result).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_edit_is_written_to_output_only() {
        let path = write_sequence("edit", 5.0);
        let output = path.with_file_name("edited.json");

        let target = Target::new(path.clone(), Some(output.clone()), false);
        let mut host = target.load_host().unwrap();
        let result = ripple_remove_all_gaps(&mut host);
        target.finish(host, result).unwrap();

        let edited = SequenceSnapshot::load(&output).unwrap();
        assert_eq!(edited.video_tracks[0].clips[1].start, 2.0);
        let input = SequenceSnapshot::load(&path).unwrap();
        assert_eq!(input.video_tracks[0].clips[1].start, 5.0);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
