use uuid::Uuid;

use clipdeck_core::snap::{SnapContext, SnapHit};
use clipdeck_core::timeline::{MIN_CLIP_DURATION, Timeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
}

/// New `(start, duration)` after dragging the left edge by `dt` seconds. The
/// start never goes below zero and the end stays put when the duration floor
/// kicks in.
pub fn trim_left(start: f64, duration: f64, dt: f64) -> (f64, f64) {
    let end = start + duration;
    let mut new_start = start + dt;
    let mut new_duration = duration - dt;
    if new_start < 0.0 {
        new_duration += new_start;
        new_start = 0.0;
    }
    if new_duration < MIN_CLIP_DURATION {
        new_duration = MIN_CLIP_DURATION;
        new_start = end - MIN_CLIP_DURATION;
    }
    (new_start, new_duration)
}

/// New duration after dragging the right edge by `dt` seconds.
pub fn trim_right(duration: f64, dt: f64) -> f64 {
    (duration + dt).max(MIN_CLIP_DURATION)
}

/// A trim gesture on one clip edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub clip_id: Uuid,
    pub edge: ResizeEdge,
    pub origin_x: f64,
    pub original_start: f64,
    pub original_duration: f64,
    pub snap_guide: Option<f64>,
}

impl ResizeSession {
    pub fn new(timeline: &Timeline, clip_id: Uuid, edge: ResizeEdge, origin_x: f64) -> Option<Self> {
        let clip = timeline.clip(clip_id)?;
        if timeline.track(clip.track_id).ok()?.is_locked {
            return None;
        }
        Some(Self {
            clip_id,
            edge,
            origin_x,
            original_start: clip.start,
            original_duration: clip.duration,
            snap_guide: None,
        })
    }

    /// Proposed `(start, duration)` for a pointer at `x`, plus the snap that
    /// shaped it. The caller still has to collision-check the result.
    pub fn propose(
        &self,
        timeline: &Timeline,
        x: f64,
        zoom: f64,
        playhead: f64,
        snap_tolerance_px: Option<f64>,
    ) -> (f64, f64, Option<SnapHit>) {
        let mut dt = (x - self.origin_x) / zoom;
        let edge_time = match self.edge {
            ResizeEdge::Left => self.original_start,
            ResizeEdge::Right => self.original_start + self.original_duration,
        };

        let mut snap = None;
        if let Some(tolerance_px) = snap_tolerance_px {
            let exclude = [self.clip_id];
            let ctx = SnapContext::new(timeline, playhead, tolerance_px, zoom, &exclude);
            if let Some(hit) = ctx.snap_edge(edge_time + dt) {
                dt = hit.start - edge_time;
                snap = Some(hit);
            }
        }

        let (start, duration) = match self.edge {
            ResizeEdge::Left => trim_left(self.original_start, self.original_duration, dt),
            ResizeEdge::Right => (
                self.original_start,
                trim_right(self.original_duration, dt),
            ),
        };
        (start, duration, snap)
    }

    pub fn has_changed(&self, timeline: &Timeline) -> bool {
        timeline.clip(self.clip_id).is_some_and(|c| {
            c.start != self.original_start || c.duration != self.original_duration
        })
    }
}
