//! Sequence snapshot file (`sequence.json`).
//!
//! A snapshot is a plain-data copy of one editor sequence: frame metadata,
//! video and audio tracks, and per-clip timing, links and Motion values.
//! `MemoryHost` edits a snapshot in place through the `TimelineHost` trait.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clip::{ClipId, TrackKind};
use crate::geometry::{CoordinateSpace, FrameSize};
use crate::time::{Timebase, TICKS_PER_SECOND};

/// Top-level snapshot of a sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceSnapshot {
    /// Schema version.
    pub version: String,

    /// Human-readable sequence name.
    pub name: String,

    /// Last modified timestamp (ISO 8601).
    #[serde(default)]
    pub modified_at: String,

    /// Output frame size (pixels). Zero means the host could not report it.
    pub frame_width: u32,
    pub frame_height: u32,

    /// Host tick resolution.
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: i64,

    /// Video frame rate (frames per second).
    pub frame_rate: f64,

    #[serde(default)]
    pub video_tracks: Vec<TrackRecord>,

    #[serde(default)]
    pub audio_tracks: Vec<TrackRecord>,
}

/// One track and its clips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRecord {
    pub name: String,

    /// Locked tracks reject every mutation.
    #[serde(default)]
    pub locked: bool,

    #[serde(default)]
    pub clips: Vec<ClipRecord>,
}

/// One clip placed on a track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRecord {
    pub id: ClipId,

    pub name: String,

    /// Start time in seconds.
    pub start: f64,

    /// End time in seconds.
    pub end: f64,

    /// Link group; clips sharing a group move together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Project metadata of the source item.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metadata: String,

    /// Motion component values; absent on clips without one (e.g. audio).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<MotionRecord>,
}

/// Motion component values of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionRecord {
    /// Position as stored by the host (pixels or normalized).
    pub position: [f64; 2],

    /// Uniform scale in percent.
    pub scale: f64,

    /// Declared coordinate space of `position`, when the host knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_space: Option<CoordinateSpace>,
}

fn default_ticks_per_second() -> i64 {
    TICKS_PER_SECOND
}

impl SequenceSnapshot {
    /// Create an empty sequence.
    pub fn new(name: impl Into<String>, frame: FrameSize, frame_rate: f64) -> Self {
        Self {
            version: "1.0".to_string(),
            name: name.into(),
            modified_at: chrono::Utc::now().to_rfc3339(),
            frame_width: frame.width,
            frame_height: frame.height,
            ticks_per_second: TICKS_PER_SECOND,
            frame_rate,
            video_tracks: vec![],
            audio_tracks: vec![],
        }
    }

    pub fn frame_size(&self) -> FrameSize {
        FrameSize::new(self.frame_width, self.frame_height)
    }

    pub fn timebase(&self) -> Timebase {
        Timebase::new(self.ticks_per_second, self.frame_rate)
    }

    pub fn tracks(&self, kind: TrackKind) -> &[TrackRecord] {
        match kind {
            TrackKind::Video => &self.video_tracks,
            TrackKind::Audio => &self.audio_tracks,
        }
    }

    pub fn tracks_mut(&mut self, kind: TrackKind) -> &mut Vec<TrackRecord> {
        match kind {
            TrackKind::Video => &mut self.video_tracks,
            TrackKind::Audio => &mut self.audio_tracks,
        }
    }

    /// Append an empty track and return its index.
    pub fn add_track(&mut self, kind: TrackKind, name: impl Into<String>) -> usize {
        let tracks = self.tracks_mut(kind);
        tracks.push(TrackRecord {
            name: name.into(),
            locked: false,
            clips: vec![],
        });
        tracks.len() - 1
    }

    /// Add a clip to an existing track and return its new id.
    ///
    /// # Panics
    /// If the track does not exist.
    pub fn add_clip(
        &mut self,
        kind: TrackKind,
        track: usize,
        name: impl Into<String>,
        start: f64,
        end: f64,
    ) -> ClipId {
        let id = self.next_clip_id();
        let clips = &mut self.tracks_mut(kind)[track].clips;
        clips.push(ClipRecord {
            id,
            name: name.into(),
            start,
            end,
            link: None,
            metadata: String::new(),
            motion: None,
        });
        clips.sort_by(|a, b| a.start.total_cmp(&b.start));
        id
    }

    /// Put the given clips into one link group.
    pub fn link(&mut self, group: &str, ids: &[ClipId]) {
        for clip in self.clips_mut() {
            if ids.contains(&clip.id) {
                clip.link = Some(group.to_string());
            }
        }
    }

    pub fn clip(&self, id: ClipId) -> Option<&ClipRecord> {
        self.video_tracks
            .iter()
            .chain(&self.audio_tracks)
            .flat_map(|t| t.clips.iter())
            .find(|c| c.id == id)
    }

    pub fn clip_mut(&mut self, id: ClipId) -> Option<&mut ClipRecord> {
        self.clips_mut().find(|c| c.id == id)
    }

    fn clips_mut(&mut self) -> impl Iterator<Item = &mut ClipRecord> {
        self.video_tracks
            .iter_mut()
            .chain(self.audio_tracks.iter_mut())
            .flat_map(|t| t.clips.iter_mut())
    }

    fn next_clip_id(&self) -> ClipId {
        let max = self
            .video_tracks
            .iter()
            .chain(&self.audio_tracks)
            .flat_map(|t| t.clips.iter())
            .map(|c| c.id.0)
            .max();
        ClipId(max.map_or(1, |m| m + 1))
    }

    /// Latest clip end across all tracks, if any clip exists.
    pub fn last_clip_end(&self) -> Option<f64> {
        self.video_tracks
            .iter()
            .chain(&self.audio_tracks)
            .flat_map(|t| t.clips.iter())
            .map(|c| c.end)
            .reduce(f64::max)
    }

    pub fn clip_count(&self) -> usize {
        self.video_tracks
            .iter()
            .chain(&self.audio_tracks)
            .map(|t| t.clips.len())
            .sum()
    }

    /// Check structural invariants: unique ids, `end >= start`, finite times.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut seen = HashSet::new();
        for kind in TrackKind::ALL {
            for (ti, track) in self.tracks(kind).iter().enumerate() {
                for clip in &track.clips {
                    if !seen.insert(clip.id) {
                        return Err(SnapshotError::ValidationError {
                            message: format!("duplicate clip id {}", clip.id),
                        });
                    }
                    if !clip.start.is_finite() || !clip.end.is_finite() {
                        return Err(SnapshotError::ValidationError {
                            message: format!(
                                "clip {} on {kind} track {ti} has non-finite timing",
                                clip.id
                            ),
                        });
                    }
                    if clip.end < clip.start {
                        return Err(SnapshotError::ValidationError {
                            message: format!(
                                "clip {} on {kind} track {ti} ends ({}) before it starts ({})",
                                clip.id, clip.end, clip.start
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Load and validate a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref().to_path_buf();

        let json = std::fs::read_to_string(&path).map_err(|e| SnapshotError::IoError {
            path: path.clone(),
            source: e,
        })?;

        let mut snapshot: SequenceSnapshot =
            serde_json::from_str(&json).map_err(|e| SnapshotError::ParseError {
                path: path.clone(),
                source: e,
            })?;

        snapshot.validate()?;
        for kind in TrackKind::ALL {
            for track in snapshot.tracks_mut(kind) {
                track.clips.sort_by(|a, b| a.start.total_cmp(&b.start));
            }
        }

        Ok(snapshot)
    }

    /// Save the snapshot, stamping `modified_at`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SnapshotError::IoError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        self.modified_at = chrono::Utc::now().to_rfc3339();
        let json = serde_json::to_string_pretty(self).map_err(|e| SnapshotError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| SnapshotError::IoError { path, source: e })?;

        Ok(())
    }
}

/// Errors that can occur when loading or saving snapshots.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid sequence: {message}")]
    ValidationError { message: String },
}
