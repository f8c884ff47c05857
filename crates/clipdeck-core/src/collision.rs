use uuid::Uuid;

use crate::timeline::{Clip, Timeline};

/// Half-open interval intersection: `[a_start, a_end)` vs `[b_start, b_end)`.
pub fn intervals_overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> bool {
    a_start < b_end && a_end > b_start
}

impl Timeline {
    /// True if `[start, start + duration)` intersects any clip on `track_id`
    /// other than those in `exclude`.
    pub fn has_collision(&self, track_id: Uuid, start: f64, duration: f64, exclude: &[Uuid]) -> bool {
        self.find_collision(track_id, start, duration, exclude).is_some()
    }

    /// The first clip on `track_id` that `[start, start + duration)` would overlap.
    pub fn find_collision(
        &self,
        track_id: Uuid,
        start: f64,
        duration: f64,
        exclude: &[Uuid],
    ) -> Option<&Clip> {
        let end = start + duration;
        self.clips.iter().find(|c| {
            c.track_id == track_id
                && !exclude.contains(&c.id)
                && intervals_overlap(start, end, c.start, c.end())
        })
    }

    /// Earliest start at or after `from` where a clip of `duration` fits on
    /// `track_id` without overlapping anything.
    pub fn next_free_start(&self, track_id: Uuid, from: f64, duration: f64, exclude: &[Uuid]) -> f64 {
        let mut start = from.max(0.0);
        // Each blocker pushes the candidate past its end, so this terminates
        // after at most one step per clip on the track.
        while let Some(blocker) = self.find_collision(track_id, start, duration, exclude) {
            start = blocker.end();
        }
        start
    }
}
