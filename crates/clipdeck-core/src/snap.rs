//! Magnetic snapping against the playhead and the edges of other clips.
//!
//! Tolerance is configured in screen pixels and converted to time with the
//! current zoom, so snapping feels the same at every zoom level.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::timeline::Timeline;

/// What a snapped edge lined up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapTarget {
    Playhead,
    ClipStart(Uuid),
    ClipEnd(Uuid),
}

/// A successful snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapHit {
    /// Replacement value: the clip start for `snap_clip`, the edge time for `snap_edge`.
    pub start: f64,
    /// Time of the aligned edge, for drawing a guide line.
    pub align_time: f64,
    pub target: SnapTarget,
}

/// Convert a pixel tolerance into seconds at the given zoom.
pub fn snap_tolerance(tolerance_px: f64, zoom: f64) -> f64 {
    tolerance_px / zoom
}

/// Candidate set for one evaluation: everything on the timeline except the
/// clips taking part in the current gesture.
pub struct SnapContext<'a> {
    timeline: &'a Timeline,
    playhead: f64,
    tolerance: f64,
    exclude: &'a [Uuid],
}

impl<'a> SnapContext<'a> {
    pub fn new(
        timeline: &'a Timeline,
        playhead: f64,
        tolerance_px: f64,
        zoom: f64,
        exclude: &'a [Uuid],
    ) -> Self {
        Self {
            timeline,
            playhead,
            tolerance: snap_tolerance(tolerance_px, zoom),
            exclude,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn near(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.tolerance
    }

    /// Snap a whole clip spanning `[start, start + duration)`. Only one edge
    /// snaps; the first candidate within tolerance wins, playhead first.
    pub fn snap_clip(&self, start: f64, duration: f64) -> Option<SnapHit> {
        let end = start + duration;
        let hit = |start: f64, align_time: f64, target: SnapTarget| {
            debug!(?target, start, "clip snapped");
            Some(SnapHit {
                start,
                align_time,
                target,
            })
        };

        if self.near(start, self.playhead) {
            return hit(self.playhead, self.playhead, SnapTarget::Playhead);
        }
        if self.near(end, self.playhead) {
            return hit(self.playhead - duration, self.playhead, SnapTarget::Playhead);
        }

        for other in self.timeline.clips.iter().filter(|c| !self.exclude.contains(&c.id)) {
            let (other_start, other_end) = (other.start, other.end());
            if self.near(start, other_end) {
                return hit(other_end, other_end, SnapTarget::ClipEnd(other.id));
            }
            if self.near(end, other_start) {
                return hit(other_start - duration, other_start, SnapTarget::ClipStart(other.id));
            }
            if self.near(start, other_start) {
                return hit(other_start, other_start, SnapTarget::ClipStart(other.id));
            }
            if self.near(end, other_end) {
                return hit(other_end - duration, other_end, SnapTarget::ClipEnd(other.id));
            }
        }
        None
    }

    /// Snap a single edge at time `t` (used by trim handles).
    pub fn snap_edge(&self, t: f64) -> Option<SnapHit> {
        if self.near(t, self.playhead) {
            return Some(SnapHit {
                start: self.playhead,
                align_time: self.playhead,
                target: SnapTarget::Playhead,
            });
        }
        self.timeline
            .clips
            .iter()
            .filter(|c| !self.exclude.contains(&c.id))
            .find_map(|other| {
                if self.near(t, other.start) {
                    Some((other.start, SnapTarget::ClipStart(other.id)))
                } else if self.near(t, other.end()) {
                    Some((other.end(), SnapTarget::ClipEnd(other.id)))
                } else {
                    None
                }
            })
            .map(|(edge, target)| SnapHit {
                start: edge,
                align_time: edge,
                target,
            })
    }
}
