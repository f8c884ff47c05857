use uuid::Uuid;

use clipdeck_core::snap::{SnapContext, SnapHit};
use clipdeck_core::timeline::Timeline;

/// Where a dragged clip was when the gesture began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    pub clip_id: Uuid,
    pub track_id: Uuid,
    pub start: f64,
    pub duration: f64,
}

/// `(clip_id, track_id, start)`, as accepted by `Timeline::place_clips`.
pub type Placement = (Uuid, Uuid, f64);

/// Inputs for one pointer-move frame of a drag.
#[derive(Debug, Clone, Copy)]
pub struct DragFrame {
    /// Horizontal pointer travel since the press, in pixels.
    pub dx: f64,
    /// Track lane under the pointer.
    pub hover_track: Option<Uuid>,
    pub zoom: f64,
    pub playhead: f64,
    /// Snap tolerance in pixels, or `None` when snapping is off.
    pub snap_tolerance_px: Option<f64>,
}

/// Placements to try for one frame, in order of preference.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPlan {
    /// Every clip moved onto the hovered track.
    pub cross_track: Option<Vec<Placement>>,
    /// Every clip kept on its current track.
    pub in_place: Vec<Placement>,
    pub snap: Option<SnapHit>,
}

/// A clip move gesture over one or more clips that travel as a rigid group.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// The clip under the pointer at press time; snapping is measured on it.
    pub anchor_id: Uuid,
    pub origin_x: f64,
    pub origin_y: f64,
    pub originals: Vec<DragOrigin>,
    /// Aligned time of the last snap, for the renderer's guide line.
    pub snap_guide: Option<f64>,
}

impl DragSession {
    /// Capture the pre-drag positions of `ids`. Clips on locked tracks stay
    /// behind. Returns `None` if the anchor itself cannot move.
    pub fn new(timeline: &Timeline, anchor_id: Uuid, ids: &[Uuid], origin: (f64, f64)) -> Option<Self> {
        let movable = |id: &Uuid| {
            let clip = timeline.clip(*id)?;
            let track = timeline.track(clip.track_id).ok()?;
            (!track.is_locked).then_some(DragOrigin {
                clip_id: clip.id,
                track_id: clip.track_id,
                start: clip.start,
                duration: clip.duration,
            })
        };

        let mut originals: Vec<DragOrigin> = ids.iter().filter_map(|id| movable(id)).collect();
        if !originals.iter().any(|o| o.clip_id == anchor_id) {
            originals.insert(0, movable(&anchor_id)?);
        }

        Some(Self {
            anchor_id,
            origin_x: origin.0,
            origin_y: origin.1,
            originals,
            snap_guide: None,
        })
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.originals.iter().map(|o| o.clip_id).collect()
    }

    /// The one track every dragged clip started on, if there is one.
    pub fn source_track(&self) -> Option<Uuid> {
        let first = self.originals.first()?.track_id;
        self.originals
            .iter()
            .all(|o| o.track_id == first)
            .then_some(first)
    }

    /// True once any clip sits somewhere other than where it started.
    pub fn has_moved(&self, timeline: &Timeline) -> bool {
        self.originals.iter().any(|o| {
            timeline
                .clip(o.clip_id)
                .is_some_and(|c| c.start != o.start || c.track_id != o.track_id)
        })
    }

    /// Work out where the group would go for this frame. Nothing is mutated;
    /// the caller tries the placements and drops the frame if none is legal.
    pub fn plan(&self, timeline: &Timeline, frame: DragFrame) -> DragPlan {
        let earliest = self
            .originals
            .iter()
            .map(|o| o.start)
            .fold(f64::INFINITY, f64::min);
        // The left-most clip stops at zero and the rest keep their spacing.
        let floor = -earliest;
        let mut dt = (frame.dx / frame.zoom).max(floor);

        let mut snap = None;
        if let (Some(tolerance_px), Some(anchor)) = (
            frame.snap_tolerance_px,
            self.originals.iter().find(|o| o.clip_id == self.anchor_id),
        ) {
            let ids = self.ids();
            let ctx = SnapContext::new(timeline, frame.playhead, tolerance_px, frame.zoom, &ids);
            if let Some(hit) = ctx.snap_clip(anchor.start + dt, anchor.duration) {
                let snapped_dt = hit.start - anchor.start;
                if snapped_dt >= floor {
                    dt = snapped_dt;
                    snap = Some(hit);
                }
            }
        }

        let current_track = |o: &DragOrigin| {
            timeline
                .clip(o.clip_id)
                .map(|c| c.track_id)
                .unwrap_or(o.track_id)
        };

        let in_place: Vec<Placement> = self
            .originals
            .iter()
            .map(|o| (o.clip_id, current_track(o), o.start + dt))
            .collect();

        let cross_track = match (self.source_track(), frame.hover_track) {
            (Some(_), Some(hover)) => {
                let on_single_track = in_place.iter().all(|p| p.1 == in_place[0].1);
                let unlocked = timeline.track(hover).is_ok_and(|t| !t.is_locked);
                (on_single_track && unlocked && in_place[0].1 != hover).then(|| {
                    in_place
                        .iter()
                        .map(|&(clip_id, _, start)| (clip_id, hover, start))
                        .collect()
                })
            }
            _ => None,
        };

        DragPlan {
            cross_track,
            in_place,
            snap,
        }
    }
}
