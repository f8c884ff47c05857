use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::timeline::{Clip, MIN_CLIP_DURATION, Timeline};

/// Which part of a clip a cut-and-delete discards, relative to the cut point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutSide {
    Left,
    Right,
}

impl Timeline {
    /// Pull every clip on `track_id` that starts at or after `deleted_start`
    /// left by `deleted_duration`, flooring at zero. Other tracks are untouched.
    /// Returns how many clips moved.
    pub fn ripple_close_gap(&mut self, track_id: Uuid, deleted_start: f64, deleted_duration: f64) -> usize {
        let mut shifted = 0;
        for clip in self
            .clips
            .iter_mut()
            .filter(|c| c.track_id == track_id && c.start >= deleted_start)
        {
            clip.start = (clip.start - deleted_duration).max(0.0);
            shifted += 1;
        }
        debug!(track = %track_id, deleted_start, deleted_duration, shifted, "ripple");
        shifted
    }

    /// Remove a clip and, when `ripple` is set, close the gap it leaves.
    pub fn delete_clip(&mut self, id: Uuid, ripple: bool) -> Result<Clip> {
        let clip = self.remove_clip(id)?;
        if ripple {
            self.ripple_close_gap(clip.track_id, clip.start, clip.duration);
        }
        Ok(clip)
    }

    /// Remove several clips at once. Every id must exist on an unlocked track,
    /// otherwise nothing is removed. Rippling runs per track from the latest
    /// clip backwards so each gap is measured against unshifted positions.
    pub fn delete_clips(&mut self, ids: &[Uuid], ripple: bool) -> Result<Vec<Clip>> {
        let mut targets: Vec<(Uuid, f64)> = Vec::with_capacity(ids.len());
        for &id in ids {
            let clip = self.clip(id).ok_or(CoreError::ClipNotFound(id))?;
            if self.track(clip.track_id)?.is_locked {
                return Err(CoreError::TrackLocked(clip.track_id));
            }
            if !targets.iter().any(|(t, _)| *t == id) {
                targets.push((id, clip.start));
            }
        }
        targets.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut removed = Vec::with_capacity(targets.len());
        for (id, _) in targets {
            removed.push(self.delete_clip(id, ripple)?);
        }
        Ok(removed)
    }

    /// Cut a clip at `at` and discard one side. With `ripple`, the removed span
    /// is closed on the clip's track.
    pub fn cut_and_delete(&mut self, id: Uuid, at: f64, side: CutSide, ripple: bool) -> Result<()> {
        let clip = self.clip(id).ok_or(CoreError::ClipNotFound(id))?;
        if at <= clip.start || at >= clip.end() {
            return Err(CoreError::CutOutsideClip { position: at });
        }
        let (track_id, start, end) = (clip.track_id, clip.start, clip.end());

        let (kept_start, kept_duration, gap_start, gap_duration) = match side {
            CutSide::Left => (at, end - at, start, at - start),
            CutSide::Right => (start, at - start, at, end - at),
        };
        if kept_duration < MIN_CLIP_DURATION {
            return Err(CoreError::InvalidDuration(kept_duration));
        }

        self.set_clip_span(id, kept_start, kept_duration)?;
        if ripple {
            self.ripple_close_gap(track_id, gap_start, gap_duration);
        }
        Ok(())
    }
}
