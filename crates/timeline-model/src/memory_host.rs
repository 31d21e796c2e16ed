//! In-memory `TimelineHost` over a `SequenceSnapshot`.
//!
//! Behaves like an editor host where it matters to the engines: locked
//! tracks reject mutations, tracks re-sort after a move (so indices go
//! stale), and link groups are resolved on every query.

use crate::clip::{ClipId, ClipRef, TrackKind};
use crate::geometry::{CoordinateSpace, FrameSize};
use crate::host::{
    HostError, PropertyValue, SourceDescriptor, TimelineHost, POSITION_PROPERTY, SCALE_PROPERTY,
};
use crate::sequence::{ClipRecord, SequenceSnapshot};
use crate::time::{TimePoint, Timebase};

/// Where a clip currently lives.
#[derive(Debug, Clone, Copy)]
struct ClipLocation {
    kind: TrackKind,
    track: usize,
    slot: usize,
}

/// A host with an optional active sequence held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    sequence: Option<SequenceSnapshot>,
}

impl MemoryHost {
    /// Host with `sequence` as the active sequence.
    pub fn new(mut sequence: SequenceSnapshot) -> Self {
        for kind in TrackKind::ALL {
            for track in sequence.tracks_mut(kind) {
                track.clips.sort_by(|a, b| a.start.total_cmp(&b.start));
            }
        }
        Self {
            sequence: Some(sequence),
        }
    }

    /// Host with no sequence open.
    pub fn without_sequence() -> Self {
        Self { sequence: None }
    }

    pub fn sequence(&self) -> Option<&SequenceSnapshot> {
        self.sequence.as_ref()
    }

    pub fn sequence_mut(&mut self) -> Option<&mut SequenceSnapshot> {
        self.sequence.as_mut()
    }

    pub fn into_sequence(self) -> Option<SequenceSnapshot> {
        self.sequence
    }

    fn locate(&self, id: ClipId) -> Result<(ClipLocation, &ClipRecord), HostError> {
        let seq = self.sequence.as_ref().ok_or(HostError::ClipNotFound { id })?;
        for kind in TrackKind::ALL {
            for (track, record) in seq.tracks(kind).iter().enumerate() {
                if let Some(slot) = record.clips.iter().position(|c| c.id == id) {
                    return Ok((ClipLocation { kind, track, slot }, &record.clips[slot]));
                }
            }
        }
        Err(HostError::ClipNotFound { id })
    }

    fn to_clip_ref(&self, kind: TrackKind, track: usize, clip: &ClipRecord) -> ClipRef {
        let tps = self
            .sequence
            .as_ref()
            .map_or(crate::time::TICKS_PER_SECOND, |s| s.ticks_per_second);
        ClipRef {
            id: clip.id,
            name: clip.name.clone(),
            kind,
            track_index: track,
            start: TimePoint::from_seconds(clip.start, tps),
            end: TimePoint::from_seconds(clip.end, tps),
        }
    }

    /// Reject mutations on locked tracks.
    fn ensure_unlocked(&self, id: ClipId, loc: ClipLocation) -> Result<(), HostError> {
        if self.is_track_locked(loc.kind, loc.track)? {
            return Err(HostError::TrackLocked {
                kind: loc.kind,
                index: loc.track,
                id,
            });
        }
        Ok(())
    }

    fn sequence_or_missing(&mut self, id: ClipId) -> Result<&mut SequenceSnapshot, HostError> {
        self.sequence.as_mut().ok_or(HostError::ClipNotFound { id })
    }
}

impl TimelineHost for MemoryHost {
    fn has_active_sequence(&self) -> bool {
        self.sequence.is_some()
    }

    fn track_count(&self, kind: TrackKind) -> usize {
        self.sequence.as_ref().map_or(0, |s| s.tracks(kind).len())
    }

    fn is_track_locked(&self, kind: TrackKind, index: usize) -> Result<bool, HostError> {
        self.sequence
            .as_ref()
            .and_then(|s| s.tracks(kind).get(index))
            .map(|t| t.locked)
            .ok_or(HostError::TrackNotFound { kind, index })
    }

    fn clips(&self, kind: TrackKind, index: usize) -> Result<Vec<ClipRef>, HostError> {
        let track = self
            .sequence
            .as_ref()
            .and_then(|s| s.tracks(kind).get(index))
            .ok_or(HostError::TrackNotFound { kind, index })?;
        Ok(track
            .clips
            .iter()
            .map(|c| self.to_clip_ref(kind, index, c))
            .collect())
    }

    fn move_clip(&mut self, id: ClipId, delta_secs: f64) -> Result<(), HostError> {
        let (loc, _) = self.locate(id)?;
        self.ensure_unlocked(id, loc)?;
        if !delta_secs.is_finite() {
            return Err(HostError::Rejected {
                message: format!("cannot move clip {id} by {delta_secs} seconds"),
            });
        }

        let seq = self.sequence_or_missing(id)?;
        let clips = &mut seq.tracks_mut(loc.kind)[loc.track].clips;
        let clip = &mut clips[loc.slot];
        clip.start += delta_secs;
        clip.end += delta_secs;
        tracing::debug!(
            clip = %id,
            kind = %loc.kind,
            track = loc.track,
            delta_secs,
            new_start = clip.start,
            "Moved clip"
        );
        clips.sort_by(|a, b| a.start.total_cmp(&b.start));
        Ok(())
    }

    fn linked_items(&self, id: ClipId) -> Result<Vec<ClipRef>, HostError> {
        let (_, record) = self.locate(id)?;
        let Some(group) = record.link.clone() else {
            return Ok(vec![]);
        };

        let mut linked = vec![];
        if let Some(seq) = self.sequence.as_ref() {
            for kind in TrackKind::ALL {
                for (ti, track) in seq.tracks(kind).iter().enumerate() {
                    for clip in &track.clips {
                        if clip.id != id && clip.link.as_deref() == Some(group.as_str()) {
                            linked.push(self.to_clip_ref(kind, ti, clip));
                        }
                    }
                }
            }
        }
        Ok(linked)
    }

    fn frame_size(&self) -> Option<FrameSize> {
        self.sequence
            .as_ref()
            .map(|s| s.frame_size())
            .filter(FrameSize::is_valid)
    }

    fn timebase(&self) -> Option<Timebase> {
        self.sequence
            .as_ref()
            .map(|s| s.timebase())
            .filter(Timebase::is_valid)
    }

    fn read_property(&self, id: ClipId, name: &str) -> Result<Option<PropertyValue>, HostError> {
        let (_, record) = self.locate(id)?;
        let Some(motion) = record.motion else {
            return Ok(None);
        };
        Ok(match name {
            POSITION_PROPERTY => Some(PropertyValue::Pair(motion.position[0], motion.position[1])),
            SCALE_PROPERTY => Some(PropertyValue::Scalar(motion.scale)),
            _ => None,
        })
    }

    fn write_property(
        &mut self,
        id: ClipId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), HostError> {
        let (loc, _) = self.locate(id)?;
        self.ensure_unlocked(id, loc)?;

        let seq = self.sequence_or_missing(id)?;
        let clip = &mut seq.tracks_mut(loc.kind)[loc.track].clips[loc.slot];
        let motion = clip.motion.as_mut().ok_or_else(|| HostError::PropertyMissing {
            id,
            name: name.to_string(),
        })?;

        match name {
            POSITION_PROPERTY => {
                let (x, y) = value.as_pair().ok_or_else(|| HostError::PropertyType {
                    id,
                    name: name.to_string(),
                    expected: "a pair",
                })?;
                motion.position = [x, y];
            }
            SCALE_PROPERTY => {
                motion.scale = value.as_scalar().ok_or_else(|| HostError::PropertyType {
                    id,
                    name: name.to_string(),
                    expected: "a scalar",
                })?;
            }
            _ => {
                return Err(HostError::PropertyMissing {
                    id,
                    name: name.to_string(),
                })
            }
        }
        tracing::debug!(clip = %id, property = name, ?value, "Wrote property");
        Ok(())
    }

    fn source_descriptor(&self, id: ClipId) -> Result<SourceDescriptor, HostError> {
        let (_, clip) = self.locate(id)?;
        Ok(SourceDescriptor {
            name: clip.name.clone(),
            metadata: clip.metadata.clone(),
        })
    }

    fn position_space_hint(&self, id: ClipId) -> Option<CoordinateSpace> {
        let (_, record) = self.locate(id).ok()?;
        record.motion.and_then(|m| m.position_space)
    }
}
