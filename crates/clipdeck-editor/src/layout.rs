//! Pointer hit-testing against the lane layout: a ruler on top, then one lane
//! per track stacked by `order`, each as tall as its track's height.

use uuid::Uuid;

use clipdeck_core::geometry::{screen_to_time, time_to_screen};
use clipdeck_core::timeline::Timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    Body,
    LeftEdge,
    RightEdge,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipHit {
    pub track_index: usize,
    pub clip_id: Uuid,
    pub zone: HitZone,
}

pub struct Layout<'a> {
    pub timeline: &'a Timeline,
    pub zoom: f64,
    pub scroll_offset: f64,
    pub ruler_height: f64,
    pub edge_grab_px: f64,
}

impl<'a> Layout<'a> {
    pub fn time_at_x(&self, x: f64) -> f64 {
        screen_to_time(x, self.zoom, self.scroll_offset)
    }

    pub fn x_at_time(&self, t: f64) -> f64 {
        time_to_screen(t, self.zoom, self.scroll_offset)
    }

    /// Top y of the lane at `index`.
    pub fn track_top(&self, index: usize) -> f64 {
        self.ruler_height
            + self
                .timeline
                .tracks
                .iter()
                .take(index)
                .map(|t| t.height as f64)
                .sum::<f64>()
    }

    /// Lane under `y`, if any.
    pub fn track_at_y(&self, y: f64) -> Option<usize> {
        if y < self.ruler_height {
            return None;
        }
        let mut top = self.ruler_height;
        for (i, track) in self.timeline.tracks.iter().enumerate() {
            let bottom = top + track.height as f64;
            if y < bottom {
                return Some(i);
            }
            top = bottom;
        }
        None
    }

    /// Lane under `y`, clamped to the first/last lane when outside them.
    pub fn track_at_y_clamped(&self, y: f64) -> usize {
        if y < self.ruler_height {
            return 0;
        }
        self.track_at_y(y)
            .unwrap_or(self.timeline.tracks.len().saturating_sub(1))
    }

    pub fn hit_test_clip(&self, x: f64, y: f64) -> Option<ClipHit> {
        let track_index = self.track_at_y(y)?;
        let track = &self.timeline.tracks[track_index];

        self.timeline
            .clips
            .iter()
            .filter(|c| c.track_id == track.id)
            .find_map(|clip| {
                let start_px = self.x_at_time(clip.start);
                let end_px = self.x_at_time(clip.end());
                if x < start_px || x > end_px {
                    return None;
                }
                // Narrow clips keep a grabbable body in the middle third.
                let grab = self.edge_grab_px.min((end_px - start_px) / 3.0);
                let zone = if x <= start_px + grab {
                    HitZone::LeftEdge
                } else if x >= end_px - grab {
                    HitZone::RightEdge
                } else {
                    HitZone::Body
                };
                Some(ClipHit {
                    track_index,
                    clip_id: clip.id,
                    zone,
                })
            })
    }
}
