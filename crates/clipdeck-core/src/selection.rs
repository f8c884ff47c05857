use uuid::Uuid;

use crate::timeline::{Clip, Timeline};

/// Transient clip selection. Never part of a history snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<Uuid>,
    /// `(clip_id, track_id)` of the most recently selected clip; shift-range
    /// selection extends from here.
    anchor: Option<(Uuid, Uuid)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected clip ids, in selection order.
    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn last_selected(&self) -> Option<(Uuid, Uuid)> {
        self.anchor
    }

    pub fn select_only(&mut self, clip: &Clip) {
        self.ids.clear();
        self.ids.push(clip.id);
        self.anchor = Some((clip.id, clip.track_id));
    }

    /// Add or remove a clip. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, clip: &Clip) -> bool {
        if let Some(pos) = self.ids.iter().position(|id| *id == clip.id) {
            self.ids.remove(pos);
            if self.anchor.map(|(id, _)| id) == Some(clip.id) {
                self.anchor = None;
            }
            false
        } else {
            self.ids.push(clip.id);
            self.anchor = Some((clip.id, clip.track_id));
            true
        }
    }

    /// Select every clip between the anchor and `clip` (inclusive, by start
    /// order) when both sit on the same track. Otherwise `clip` is just added.
    pub fn extend_to(&mut self, timeline: &Timeline, clip: &Clip) {
        let anchor = match self.anchor {
            Some((anchor_id, track_id)) if track_id == clip.track_id => anchor_id,
            _ => {
                self.add(clip.id);
                self.anchor = Some((clip.id, clip.track_id));
                return;
            }
        };

        let lane = timeline.clips_on_track(clip.track_id);
        let from = lane.iter().position(|c| c.id == anchor);
        let to = lane.iter().position(|c| c.id == clip.id);
        if let (Some(from), Some(to)) = (from, to) {
            let (lo, hi) = (from.min(to), from.max(to));
            for c in &lane[lo..=hi] {
                self.add(c.id);
            }
        } else {
            self.add(clip.id);
        }
        self.anchor = Some((clip.id, clip.track_id));
    }

    pub fn select_all(&mut self, timeline: &Timeline) {
        self.ids = timeline.clips.iter().map(|c| c.id).collect();
        self.anchor = timeline.clips.last().map(|c| (c.id, c.track_id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.anchor = None;
    }

    /// Drop ids that no longer exist and refresh the anchor's track, which a
    /// cross-track move may have changed.
    pub fn retain_existing(&mut self, timeline: &Timeline) {
        self.ids.retain(|id| timeline.clip(*id).is_some());
        self.anchor = self
            .anchor
            .and_then(|(id, _)| timeline.clip(id).map(|c| (c.id, c.track_id)));
    }

    fn add(&mut self, id: Uuid) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }
}
