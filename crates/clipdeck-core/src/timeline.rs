use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Shortest duration a clip may have after any edit, in seconds.
pub const MIN_CLIP_DURATION: f64 = 0.5;

pub const DEFAULT_TRACK_HEIGHT: f32 = 40.0;
pub const MIN_TRACK_HEIGHT: f32 = 20.0;

/// Colors assigned to new tracks, cycling by track count.
pub const TRACK_PALETTE: [Rgb; 7] = [
    Rgb::new(0x64, 0x74, 0x8b),
    Rgb::new(0xea, 0xb3, 0x08),
    Rgb::new(0x22, 0xc5, 0x5e),
    Rgb::new(0x3b, 0x82, 0xf6),
    Rgb::new(0xa8, 0x55, 0xf7),
    Rgb::new(0xef, 0x44, 0x44),
    Rgb::new(0x06, 0xb6, 0xd4),
];

/// A time range with start (inclusive) and end (exclusive), in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if start >= end {
            return Err(CoreError::InvalidDuration(end - start));
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// An RGB track color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// What a clip carries. Only `Sound` clips keep a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    #[default]
    Video,
    Image,
    Sound,
    Effect,
}

/// A clip placed on a track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clip {
    pub id: Uuid,
    pub track_id: Uuid,
    pub name: String,
    /// Timeline start, in seconds.
    pub start: f64,
    /// Length on the timeline, in seconds.
    pub duration: f64,
    pub kind: ClipKind,
    /// 0–100, sound clips only.
    #[serde(default)]
    pub volume: Option<u8>,
    /// Resource the clip plays from, if any.
    #[serde(default)]
    pub src: Option<String>,
}

impl Clip {
    pub fn new(
        track_id: Uuid,
        name: impl Into<String>,
        kind: ClipKind,
        start: f64,
        duration: f64,
    ) -> Self {
        let volume = (kind == ClipKind::Sound).then_some(100);
        Self {
            id: Uuid::new_v4(),
            track_id,
            name: name.into(),
            start,
            duration,
            kind,
            volume,
            src: None,
        }
    }

    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Set the volume, clamped to 100. Ignored for non-sound clips.
    pub fn with_volume(mut self, volume: u8) -> Self {
        if self.kind == ClipKind::Sound {
            self.volume = Some(volume.min(100));
        }
        self
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end(),
        }
    }
}

/// A lane holding non-overlapping clips. Clips reference tracks by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub id: Uuid,
    pub name: String,
    pub color: Rgb,
    /// Dense, 0-based; always equal to the track's index in `Timeline::tracks`.
    pub order: usize,
    pub height: f32,
    pub is_visible: bool,
    pub is_locked: bool,
    pub is_main: bool,
}

impl Track {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color,
            order: 0,
            height: DEFAULT_TRACK_HEIGHT,
            is_visible: true,
            is_locked: false,
            is_main: false,
        }
    }
}

/// What happens to a removed track's clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoveTrackPolicy {
    DeleteClips,
    ReassignTo(Uuid),
}

/// The editable document: ordered tracks plus the clips placed on them.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Timeline {
    pub tracks: Vec<Track>,
    pub clips: Vec<Clip>,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            clips: Vec::new(),
        }
    }

    // ---- tracks ----

    /// Append a track, picking its color from the palette. Returns its id.
    pub fn add_track(&mut self, name: impl Into<String>) -> Uuid {
        let color = TRACK_PALETTE[self.tracks.len() % TRACK_PALETTE.len()];
        self.push_track(Track::new(name, color))
    }

    /// Append a prepared track. `order` is overwritten and a second main track
    /// is demoted.
    pub fn push_track(&mut self, mut track: Track) -> Uuid {
        if track.is_main && self.tracks.iter().any(|t| t.is_main) {
            track.is_main = false;
        }
        track.order = self.tracks.len();
        let id = track.id;
        info!(track = %id, name = %track.name, "track added");
        self.tracks.push(track);
        id
    }

    pub fn track(&self, id: Uuid) -> Result<&Track> {
        self.tracks
            .iter()
            .find(|t| t.id == id)
            .ok_or(CoreError::TrackNotFound(id))
    }

    pub fn track_mut(&mut self, id: Uuid) -> Result<&mut Track> {
        self.tracks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CoreError::TrackNotFound(id))
    }

    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn track_index(&self, id: Uuid) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn main_track(&self) -> Option<&Track> {
        self.tracks.iter().find(|t| t.is_main)
    }

    /// Remove a track. Rejected when it is the only track, since every clip
    /// needs a track to live on.
    pub fn remove_track(&mut self, id: Uuid, policy: RemoveTrackPolicy) -> Result<Track> {
        let idx = self.track_index(id).ok_or(CoreError::TrackNotFound(id))?;
        if self.tracks.len() <= 1 {
            return Err(CoreError::LastTrack);
        }

        match policy {
            RemoveTrackPolicy::DeleteClips => {
                self.clips.retain(|c| c.track_id != id);
            }
            RemoveTrackPolicy::ReassignTo(target) => {
                if target == id {
                    return Err(CoreError::TrackNotFound(target));
                }
                self.ensure_unlocked(target)?;
                let moving: Vec<Uuid> = self
                    .clips
                    .iter()
                    .filter(|c| c.track_id == id)
                    .map(|c| c.id)
                    .collect();
                for clip in self.clips.iter().filter(|c| c.track_id == id) {
                    if self.has_collision(target, clip.start, clip.duration, &moving) {
                        return Err(CoreError::ClipOverlap {
                            track_id: target,
                            start: clip.start,
                        });
                    }
                }
                for clip in self.clips.iter_mut().filter(|c| c.track_id == id) {
                    clip.track_id = target;
                }
            }
        }

        let track = self.tracks.remove(idx);
        self.renumber_tracks();
        info!(track = %id, "track removed");
        Ok(track)
    }

    /// Move the track at `from` to `to` (splice semantics) and renumber.
    pub fn reorder_track(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.tracks.len() {
            return Err(CoreError::TrackIndexOutOfRange(from));
        }
        if to >= self.tracks.len() {
            return Err(CoreError::TrackIndexOutOfRange(to));
        }
        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);
        self.renumber_tracks();
        info!(from, to, "track reordered");
        Ok(())
    }

    /// Make `id` the main track, or clear the flag if it already is.
    /// Returns the track's new main state.
    pub fn set_main_track(&mut self, id: Uuid) -> Result<bool> {
        let was_main = self.track(id)?.is_main;
        for track in &mut self.tracks {
            track.is_main = !was_main && track.id == id;
        }
        Ok(!was_main)
    }

    pub fn toggle_visible(&mut self, id: Uuid) -> Result<bool> {
        let track = self.track_mut(id)?;
        track.is_visible = !track.is_visible;
        Ok(track.is_visible)
    }

    pub fn toggle_locked(&mut self, id: Uuid) -> Result<bool> {
        let track = self.track_mut(id)?;
        track.is_locked = !track.is_locked;
        Ok(track.is_locked)
    }

    /// Rename a track. Blank names are ignored.
    pub fn rename_track(&mut self, id: Uuid, name: &str) -> Result<()> {
        let track = self.track_mut(id)?;
        let name = name.trim();
        if !name.is_empty() {
            track.name = name.to_string();
        }
        Ok(())
    }

    pub fn set_track_height(&mut self, id: Uuid, height: f32) -> Result<()> {
        self.track_mut(id)?.height = height.max(MIN_TRACK_HEIGHT);
        Ok(())
    }

    /// Insert a copy of a track (and its clips) directly below it.
    pub fn duplicate_track(&mut self, id: Uuid) -> Result<Uuid> {
        let idx = self.track_index(id).ok_or(CoreError::TrackNotFound(id))?;
        let source = &self.tracks[idx];
        let copy = Track {
            id: Uuid::new_v4(),
            name: format!("{} copy", source.name),
            color: source.color,
            order: 0,
            height: source.height,
            is_visible: true,
            is_locked: false,
            is_main: false,
        };
        let copy_id = copy.id;

        let copies: Vec<Clip> = self
            .clips
            .iter()
            .filter(|c| c.track_id == id)
            .map(|c| Clip {
                id: Uuid::new_v4(),
                track_id: copy_id,
                ..c.clone()
            })
            .collect();

        self.tracks.insert(idx + 1, copy);
        self.clips.extend(copies);
        self.renumber_tracks();
        info!(source = %id, track = %copy_id, "track duplicated");
        Ok(copy_id)
    }

    fn renumber_tracks(&mut self) {
        for (i, track) in self.tracks.iter_mut().enumerate() {
            track.order = i;
        }
    }

    fn ensure_unlocked(&self, track_id: Uuid) -> Result<()> {
        if self.track(track_id)?.is_locked {
            return Err(CoreError::TrackLocked(track_id));
        }
        Ok(())
    }

    // ---- clips ----

    pub fn clip(&self, id: Uuid) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    fn clip_mut(&mut self, id: Uuid) -> Result<&mut Clip> {
        self.clips
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CoreError::ClipNotFound(id))
    }

    fn existing_clip(&self, id: Uuid) -> Result<&Clip> {
        self.clip(id).ok_or(CoreError::ClipNotFound(id))
    }

    /// Clips on a track, sorted by start.
    pub fn clips_on_track(&self, track_id: Uuid) -> Vec<&Clip> {
        let mut clips: Vec<&Clip> = self
            .clips
            .iter()
            .filter(|c| c.track_id == track_id)
            .collect();
        clips.sort_by(|a, b| a.start.total_cmp(&b.start));
        clips
    }

    /// Find the clip on a track covering time `t`.
    pub fn clip_at(&self, track_id: Uuid, t: f64) -> Option<&Clip> {
        self.clips
            .iter()
            .find(|c| c.track_id == track_id && c.range().contains(t))
    }

    /// Add a clip to the track it references. Negative starts are clamped to
    /// zero; overlapping placements are rejected.
    pub fn add_clip(&mut self, mut clip: Clip) -> Result<Uuid> {
        self.ensure_unlocked(clip.track_id)?;
        if !clip.duration.is_finite() || clip.duration < MIN_CLIP_DURATION {
            return Err(CoreError::InvalidDuration(clip.duration));
        }
        clip.start = clip.start.max(0.0);
        if self.has_collision(clip.track_id, clip.start, clip.duration, &[]) {
            return Err(CoreError::ClipOverlap {
                track_id: clip.track_id,
                start: clip.start,
            });
        }
        let id = clip.id;
        debug!(clip = %id, start = clip.start, duration = clip.duration, "clip added");
        self.clips.push(clip);
        Ok(id)
    }

    pub fn remove_clip(&mut self, id: Uuid) -> Result<Clip> {
        let idx = self
            .clips
            .iter()
            .position(|c| c.id == id)
            .ok_or(CoreError::ClipNotFound(id))?;
        self.ensure_unlocked(self.clips[idx].track_id)?;
        Ok(self.clips.remove(idx))
    }

    /// Shift a clip by `dt` seconds on its own track, clamping at zero.
    pub fn move_clip(&mut self, id: Uuid, dt: f64) -> Result<()> {
        let clip = self.existing_clip(id)?;
        let (track_id, start) = (clip.track_id, (clip.start + dt).max(0.0));
        self.move_clip_to(id, track_id, start)
    }

    /// Place a clip at `start` on `track_id`, keeping its duration.
    pub fn move_clip_to(&mut self, id: Uuid, track_id: Uuid, start: f64) -> Result<()> {
        let clip = self.existing_clip(id)?;
        self.ensure_unlocked(clip.track_id)?;
        self.ensure_unlocked(track_id)?;
        let start = start.max(0.0);
        if self.has_collision(track_id, start, clip.duration, &[id]) {
            return Err(CoreError::ClipOverlap { track_id, start });
        }
        let clip = self.clip_mut(id)?;
        clip.track_id = track_id;
        clip.start = start;
        Ok(())
    }

    /// Adjust start and duration by deltas. The start is clamped at zero (the
    /// overshoot is taken out of the duration) and the duration is floored.
    pub fn update_clip(&mut self, id: Uuid, start_delta: f64, duration_delta: f64) -> Result<()> {
        let clip = self.existing_clip(id)?;
        let mut start = clip.start + start_delta;
        let mut duration = clip.duration + duration_delta;
        if start < 0.0 {
            duration += start;
            start = 0.0;
        }
        self.set_clip_span(id, start, duration.max(MIN_CLIP_DURATION))
    }

    /// Set a clip's extent directly. Both bounds are validated, never clamped.
    pub fn set_clip_span(&mut self, id: Uuid, start: f64, duration: f64) -> Result<()> {
        let clip = self.existing_clip(id)?;
        let track_id = clip.track_id;
        self.ensure_unlocked(track_id)?;
        if !duration.is_finite() || duration < MIN_CLIP_DURATION {
            return Err(CoreError::InvalidDuration(duration));
        }
        if !start.is_finite() || start < 0.0 {
            return Err(CoreError::NegativeStart(start));
        }
        if self.has_collision(track_id, start, duration, &[id]) {
            return Err(CoreError::ClipOverlap { track_id, start });
        }
        let clip = self.clip_mut(id)?;
        clip.start = start;
        clip.duration = duration;
        Ok(())
    }

    /// Place several clips at once: `(clip_id, track_id, start)`. Either every
    /// placement is legal and all are applied, or nothing changes.
    pub fn place_clips(&mut self, placements: &[(Uuid, Uuid, f64)]) -> Result<()> {
        let group: Vec<Uuid> = placements.iter().map(|p| p.0).collect();
        let mut proposed = Vec::with_capacity(placements.len());

        for &(clip_id, track_id, start) in placements {
            let clip = self.existing_clip(clip_id)?;
            self.ensure_unlocked(clip.track_id)?;
            self.ensure_unlocked(track_id)?;
            if !start.is_finite()
                || start < 0.0
                || self.has_collision(track_id, start, clip.duration, &group)
            {
                return Err(CoreError::ClipOverlap { track_id, start });
            }
            let range = TimeRange {
                start,
                end: start + clip.duration,
            };
            for &(other_track, other_range) in &proposed {
                if other_track == track_id && range.overlaps(&other_range) {
                    return Err(CoreError::ClipOverlap { track_id, start });
                }
            }
            proposed.push((track_id, range));
        }

        for &(clip_id, track_id, start) in placements {
            let clip = self.clip_mut(clip_id)?;
            clip.track_id = track_id;
            clip.start = start;
        }
        Ok(())
    }

    /// Copy a clip into the first free slot at or after the original's end on
    /// the same track. Returns the copy's id.
    pub fn duplicate_clip(&mut self, id: Uuid) -> Result<Uuid> {
        let source = self.existing_clip(id)?;
        let start = self.next_free_start(source.track_id, source.end(), source.duration, &[]);
        let copy = Clip {
            id: Uuid::new_v4(),
            start,
            ..source.clone()
        };
        self.add_clip(copy)
    }

    /// Cut a clip in two at `at`. Both pieces must keep the minimum duration.
    /// Returns `(left_id, right_id)`; the left piece keeps the original id.
    pub fn split_clip(&mut self, id: Uuid, at: f64) -> Result<(Uuid, Uuid)> {
        let clip = self.existing_clip(id)?;
        self.ensure_unlocked(clip.track_id)?;
        if at <= clip.start || at >= clip.end() {
            return Err(CoreError::CutOutsideClip { position: at });
        }
        let left = at - clip.start;
        let right = clip.end() - at;
        if left < MIN_CLIP_DURATION || right < MIN_CLIP_DURATION {
            return Err(CoreError::InvalidDuration(left.min(right)));
        }

        let right_piece = Clip {
            id: Uuid::new_v4(),
            start: at,
            duration: right,
            ..clip.clone()
        };
        let right_id = right_piece.id;
        self.clip_mut(id)?.duration = left;
        self.clips.push(right_piece);
        Ok((id, right_id))
    }

    /// End of the last clip on any track.
    pub fn end_time(&self) -> f64 {
        self.clips.iter().map(Clip::end).fold(0.0, f64::max)
    }
}
