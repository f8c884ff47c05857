use uuid::Uuid;

use clipdeck_core::timeline::{
    Clip, ClipKind, DEFAULT_TRACK_HEIGHT, Rgb, TRACK_PALETTE, Timeline, Track,
};

/// Builder for creating test Clips with sensible defaults.
pub struct ClipBuilder {
    track_id: Uuid,
    name: String,
    kind: ClipKind,
    start: f64,
    duration: f64,
    src: Option<String>,
}

impl ClipBuilder {
    pub fn new(track_id: Uuid) -> Self {
        Self {
            track_id,
            name: "clip".into(),
            kind: ClipKind::Video,
            start: 0.0,
            duration: 5.0,
            src: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.into();
        self
    }

    pub fn kind(mut self, kind: ClipKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn at(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration = secs;
        self
    }

    pub fn src(mut self, src: &str) -> Self {
        self.src = Some(src.into());
        self
    }

    pub fn build(self) -> Clip {
        let clip = Clip::new(self.track_id, self.name, self.kind, self.start, self.duration);
        match self.src {
            Some(src) => clip.with_src(src),
            None => clip,
        }
    }
}

/// Builder for creating test Tracks.
pub struct TrackBuilder {
    name: String,
    color: Rgb,
    height: f32,
    visible: bool,
    locked: bool,
    main: bool,
}

impl TrackBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            color: TRACK_PALETTE[0],
            height: DEFAULT_TRACK_HEIGHT,
            visible: true,
            locked: false,
            main: false,
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn main(mut self) -> Self {
        self.main = true;
        self
    }

    pub fn build(self) -> Track {
        let mut track = Track::new(self.name, self.color);
        track.height = self.height;
        track.is_visible = self.visible;
        track.is_locked = self.locked;
        track.is_main = self.main;
        track
    }
}

/// Build a timeline track by track. Clips are added through the normal
/// `add_clip` path, so an overlapping fixture fails loudly. Locks are
/// applied last so locked tracks can still be populated.
pub struct TimelineBuilder {
    timeline: Timeline,
    locked: Vec<Uuid>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self {
            timeline: Timeline::new(),
            locked: Vec::new(),
        }
    }

    /// Append a plain track with the given name.
    pub fn track(self, name: &str) -> Self {
        self.with_track(TrackBuilder::new(name).build())
    }

    pub fn with_track(mut self, mut track: Track) -> Self {
        if track.is_locked {
            track.is_locked = false;
            self.locked.push(track.id);
        }
        self.timeline.push_track(track);
        self
    }

    /// Add a clip spanning `[start, start + duration)` to the track at `track_index`.
    pub fn clip(self, track_index: usize, start: f64, duration: f64) -> Self {
        let track_id = self.track_id(track_index);
        self.with_clip(ClipBuilder::new(track_id).at(start).duration_secs(duration).build())
    }

    pub fn with_clip(mut self, clip: Clip) -> Self {
        self.timeline
            .add_clip(clip)
            .expect("test timeline clips must not overlap");
        self
    }

    pub fn track_id(&self, index: usize) -> Uuid {
        self.timeline
            .track_at(index)
            .unwrap_or_else(|| panic!("no track at index {index}"))
            .id
    }

    pub fn build(mut self) -> Timeline {
        for id in self.locked {
            if let Ok(track) = self.timeline.track_mut(id) {
                track.is_locked = true;
            }
        }
        self.timeline
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Id of the `n`th clip (by start) on the track at `track_index`.
pub fn clip_id(timeline: &Timeline, track_index: usize, n: usize) -> Uuid {
    let track = timeline
        .track_at(track_index)
        .unwrap_or_else(|| panic!("no track at index {track_index}"));
    timeline
        .clips_on_track(track.id)
        .get(n)
        .unwrap_or_else(|| panic!("no clip {n} on track {track_index}"))
        .id
}
