use tracing::{debug, info, warn};
use uuid::Uuid;

use clipdeck_core::commands::CommandHistory;
use clipdeck_core::error::{CoreError, Result};
use clipdeck_core::ripple::CutSide;
use clipdeck_core::selection::Selection;
use clipdeck_core::settings::{DropCollision, EditorSettings};
use clipdeck_core::timeline::{Clip, RemoveTrackPolicy, Timeline, Track, TRACK_PALETTE};
use clipdeck_core::zoom::{AnimationToken, Viewport, ZoomCenter, ZoomController, ZoomTick};

use crate::keyboard::{Shortcut, shortcut_for};
use crate::layout::{HitZone, Layout};
use crate::message::{DropRequest, Effect, Key, Message, Modifiers};
use crate::session::drag::{DragFrame, DragSession};
use crate::session::{ResizeEdge, ResizeSession, Session, TrackReorder};

pub struct Editor {
    pub timeline: Timeline,
    pub selection: Selection,
    pub history: CommandHistory,
    pub zoom: ZoomController,
    pub viewport: Viewport,
    pub playhead: f64,
    pub settings: EditorSettings,
    pub session: Session,
    pub status_message: String,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Editor {
    /// A fresh editor with a single main track.
    pub fn new(settings: EditorSettings) -> Self {
        let mut main = Track::new("Main", TRACK_PALETTE[0]);
        main.is_main = true;
        main.height = settings.layout.default_track_height;

        let mut timeline = Timeline::new();
        timeline.push_track(main);
        Self::with_timeline(timeline, settings)
    }

    pub fn with_timeline(timeline: Timeline, settings: EditorSettings) -> Self {
        let history = CommandHistory::with_capacity(&timeline, settings.history_capacity);
        let zoom = ZoomController::new(&settings.zoom);
        Self {
            timeline,
            selection: Selection::new(),
            history,
            zoom,
            viewport: Viewport::default(),
            playhead: 0.0,
            settings,
            session: Session::Idle,
            status_message: String::new(),
        }
    }

    pub fn update(&mut self, message: Message) -> Effect {
        if message.edits_timeline() && !self.session.is_idle() {
            debug!(?message, "ignored during pointer gesture");
            self.status_message = "Finish the current gesture first".into();
            return Effect::None;
        }
        match message {
            Message::LanePressed { x, y, modifiers } => {
                self.on_lane_pressed(x, y, modifiers);
                Effect::None
            }
            Message::RulerPressed { x } => {
                if self.session.is_idle() {
                    self.playhead = self.layout().time_at_x(x).max(0.0);
                    self.session = Session::ScrubbingPlayhead;
                }
                Effect::None
            }
            Message::TrackHeaderPressed { y } => {
                if self.session.is_idle() {
                    if let Some(index) = self.layout().track_at_y(y) {
                        self.session = Session::ReorderingTrack(TrackReorder::new(index));
                    }
                }
                Effect::None
            }
            Message::PointerMoved { x, y } => {
                self.on_pointer_moved(x, y);
                Effect::None
            }
            Message::PointerReleased => {
                self.on_pointer_released();
                Effect::None
            }
            Message::Wheel {
                delta,
                pointer_x,
                modifiers,
            } => {
                if modifiers.command() {
                    let target = self.zoom.wheel_target(delta);
                    Effect::RequestFrame(self.set_zoom(target, ZoomCenter::Cursor { pointer_x }))
                } else {
                    self.viewport.scroll_offset = (self.viewport.scroll_offset + delta).max(0.0);
                    Effect::None
                }
            }
            Message::KeyPressed { key, modifiers } => {
                self.on_key(key, modifiers);
                Effect::None
            }
            Message::AnimationFrame(token) => {
                match self.zoom.tick(token, &mut self.viewport, self.playhead) {
                    ZoomTick::Animating => Effect::RequestFrame(token),
                    ZoomTick::Settled | ZoomTick::Stale => Effect::None,
                }
            }
            Message::SetZoom { value, center } => Effect::RequestFrame(self.set_zoom(value, center)),
            Message::ZoomIn => {
                let target = self.zoom.zoom_in_target();
                Effect::RequestFrame(self.set_zoom(target, ZoomCenter::Playhead))
            }
            Message::ZoomOut => {
                let target = self.zoom.zoom_out_target();
                Effect::RequestFrame(self.set_zoom(target, ZoomCenter::Playhead))
            }
            Message::ZoomToFit => {
                let target = self.zoom.fit_target(self.timeline.end_time(), &self.viewport);
                self.viewport.scroll_offset = 0.0;
                Effect::RequestFrame(self.set_zoom(target, ZoomCenter::KeepScroll))
            }
            Message::ViewportResized { width } => {
                self.viewport.width = width.max(0.0);
                Effect::None
            }
            Message::SetPlayhead(time) => {
                self.set_playhead(time);
                Effect::None
            }
            Message::AssetDropped(request) => {
                let result = self.drop_asset(request);
                if self.report("Drop", result).is_some() {
                    self.status_message = "Clip added".into();
                }
                Effect::None
            }
            Message::AddClip(clip) => {
                let result = self.add_clip(clip);
                if self.report("Add clip", result).is_some() {
                    self.status_message = "Clip added".into();
                }
                Effect::None
            }
            Message::MoveClip { id, dt } => {
                let result = self.move_clip(id, dt);
                self.report("Move", result);
                Effect::None
            }
            Message::UpdateClip {
                id,
                start_delta,
                duration_delta,
            } => {
                let result = self.update_clip(id, start_delta, duration_delta);
                self.report("Resize", result);
                Effect::None
            }
            Message::RemoveClip(id) => {
                let result = self.remove_clip(id);
                if let Some(clip) = self.report("Remove clip", result) {
                    self.status_message = format!("Removed: {}", clip.name);
                }
                Effect::None
            }
            Message::DuplicateClip(id) => {
                let result = self.duplicate_clip(id);
                if self.report("Duplicate", result).is_some() {
                    self.status_message = "Clip duplicated".into();
                }
                Effect::None
            }
            Message::SplitAtPlayhead => {
                let result = self.split_at_playhead();
                if let Some(count) = self.report("Split", result) {
                    self.status_message = format!("Split {count} clip(s)");
                }
                Effect::None
            }
            Message::CutAndDelete(side) => {
                let result = self.cut_and_delete(side);
                if let Some(count) = self.report("Cut", result) {
                    self.status_message = format!("Trimmed {count} clip(s)");
                }
                Effect::None
            }
            Message::AddTrack { name } => {
                let result = self.add_track(&name);
                self.report("Add track", result);
                Effect::None
            }
            Message::RemoveTrack { id, policy } => {
                let result = self.remove_track(id, policy);
                if let Some(track) = self.report("Remove track", result) {
                    self.status_message = format!("Removed track: {}", track.name);
                }
                Effect::None
            }
            Message::ReorderTrack { from, to } => {
                let result = self.reorder_track(from, to);
                self.report("Reorder track", result);
                Effect::None
            }
            Message::SetMainTrack(id) => {
                let result = self.set_main_track(id);
                self.report("Set main track", result);
                Effect::None
            }
            Message::ToggleVisible(id) => {
                let result = self.toggle_visible(id);
                self.report("Toggle visibility", result);
                Effect::None
            }
            Message::ToggleLocked(id) => {
                let result = self.toggle_locked(id);
                self.report("Toggle lock", result);
                Effect::None
            }
            Message::RenameTrack { id, name } => {
                let result = self.rename_track(id, &name);
                self.report("Rename track", result);
                Effect::None
            }
            Message::SetTrackHeight { id, height } => {
                let result = self.set_track_height(id, height);
                self.report("Resize track", result);
                Effect::None
            }
            Message::DuplicateTrack(id) => {
                let result = self.duplicate_track(id);
                self.report("Duplicate track", result);
                Effect::None
            }
            Message::ToggleSnap => {
                self.settings.snap.enabled = !self.settings.snap.enabled;
                Effect::None
            }
            Message::ToggleRipple => {
                self.settings.ripple_enabled = !self.settings.ripple_enabled;
                Effect::None
            }
            Message::Undo => {
                self.run_shortcut(Shortcut::Undo);
                Effect::None
            }
            Message::Redo => {
                self.run_shortcut(Shortcut::Redo);
                Effect::None
            }
            Message::SelectAll => {
                self.select_all();
                Effect::None
            }
            Message::ClearSelection => {
                self.selection.clear();
                Effect::None
            }
            Message::DeleteSelection => {
                self.run_shortcut(Shortcut::DeleteSelection);
                Effect::None
            }
        }
    }

    // ---- clips ----

    pub fn add_clip(&mut self, clip: Clip) -> Result<Uuid> {
        self.history
            .execute(&mut self.timeline, "Add clip", |tl| tl.add_clip(clip))
    }

    pub fn move_clip(&mut self, id: Uuid, dt: f64) -> Result<()> {
        self.history
            .execute(&mut self.timeline, "Move clip", |tl| tl.move_clip(id, dt))
    }

    pub fn update_clip(&mut self, id: Uuid, start_delta: f64, duration_delta: f64) -> Result<()> {
        self.history.execute(&mut self.timeline, "Resize clip", |tl| {
            tl.update_clip(id, start_delta, duration_delta)
        })
    }

    /// Remove a clip, closing the gap when ripple mode is on.
    pub fn remove_clip(&mut self, id: Uuid) -> Result<Clip> {
        let ripple = self.settings.ripple_enabled;
        let clip = self
            .history
            .execute(&mut self.timeline, "Remove clip", |tl| tl.delete_clip(id, ripple))?;
        self.selection.retain_existing(&self.timeline);
        Ok(clip)
    }

    pub fn duplicate_clip(&mut self, id: Uuid) -> Result<Uuid> {
        self.history
            .execute(&mut self.timeline, "Duplicate clip", |tl| tl.duplicate_clip(id))
    }

    /// Turn an asset drop into a clip on the lane at `track_index`.
    pub fn drop_asset(&mut self, request: DropRequest) -> Result<Uuid> {
        let track_id = self
            .timeline
            .track_at(request.track_index)
            .ok_or(CoreError::TrackIndexOutOfRange(request.track_index))?
            .id;
        let duration = self.settings.default_drop_duration;
        let start = match self.settings.drop_collision {
            DropCollision::Reject => request.time.max(0.0),
            DropCollision::NextFreeSlot => {
                self.timeline
                    .next_free_start(track_id, request.time, duration, &[])
            }
        };
        self.add_clip(Clip::new(track_id, request.name, request.kind, start, duration))
    }

    /// Split the selected clips under the playhead, or every clip under it
    /// when nothing selected is there. Returns how many clips were split.
    pub fn split_at_playhead(&mut self) -> Result<usize> {
        let at = self.playhead;
        let targets = self.clips_under_playhead();
        if targets.is_empty() {
            return Err(CoreError::CutOutsideClip { position: at });
        }
        self.history.execute(&mut self.timeline, "Split clip", |tl| {
            for id in &targets {
                tl.split_clip(*id, at)?;
            }
            Ok(targets.len())
        })
    }

    /// Trim away the part of the targeted clips on one side of the playhead.
    pub fn cut_and_delete(&mut self, side: CutSide) -> Result<usize> {
        let at = self.playhead;
        let ripple = self.settings.ripple_enabled;
        let targets = self.clips_under_playhead();
        if targets.is_empty() {
            return Err(CoreError::CutOutsideClip { position: at });
        }
        self.history.execute(&mut self.timeline, "Cut and delete", |tl| {
            for id in &targets {
                tl.cut_and_delete(*id, at, side, ripple)?;
            }
            Ok(targets.len())
        })
    }

    fn clips_under_playhead(&self) -> Vec<Uuid> {
        let at = self.playhead;
        let strictly_inside = |c: &&Clip| c.start < at && at < c.end();
        let unlocked = |c: &&Clip| {
            self.timeline
                .track(c.track_id)
                .is_ok_and(|t| !t.is_locked)
        };

        let selected: Vec<Uuid> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.timeline.clip(*id))
            .filter(strictly_inside)
            .filter(unlocked)
            .map(|c| c.id)
            .collect();
        if !selected.is_empty() {
            return selected;
        }
        self.timeline
            .clips
            .iter()
            .filter(strictly_inside)
            .filter(unlocked)
            .map(|c| c.id)
            .collect()
    }

    /// Delete every selected clip on an unlocked track. Returns how many went.
    pub fn delete_selection(&mut self) -> Result<usize> {
        let ids: Vec<Uuid> = self
            .selection
            .ids()
            .iter()
            .copied()
            .filter(|id| {
                self.timeline.clip(*id).is_some_and(|c| {
                    self.timeline
                        .track(c.track_id)
                        .is_ok_and(|t| !t.is_locked)
                })
            })
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let ripple = self.settings.ripple_enabled;
        let removed = self
            .history
            .execute(&mut self.timeline, "Delete clips", |tl| tl.delete_clips(&ids, ripple))?;
        self.selection.retain_existing(&self.timeline);
        Ok(removed.len())
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.timeline);
    }

    // ---- tracks ----

    pub fn add_track(&mut self, name: &str) -> Result<Uuid> {
        let name = if name.trim().is_empty() {
            format!("Track {}", self.timeline.tracks.len() + 1)
        } else {
            name.trim().to_string()
        };
        let height = self.settings.layout.default_track_height;
        self.history.execute(&mut self.timeline, "Add track", |tl| {
            let id = tl.add_track(name);
            tl.set_track_height(id, height)?;
            Ok(id)
        })
    }

    pub fn remove_track(&mut self, id: Uuid, policy: RemoveTrackPolicy) -> Result<Track> {
        let result = self
            .history
            .execute(&mut self.timeline, "Remove track", |tl| tl.remove_track(id, policy));
        if let Err(CoreError::LastTrack) = result {
            warn!(track = %id, "refusing to remove the last track");
        }
        let track = result?;
        self.selection.retain_existing(&self.timeline);
        Ok(track)
    }

    pub fn reorder_track(&mut self, from: usize, to: usize) -> Result<()> {
        self.history
            .execute(&mut self.timeline, "Reorder track", |tl| tl.reorder_track(from, to))
    }

    pub fn set_main_track(&mut self, id: Uuid) -> Result<bool> {
        self.history
            .execute(&mut self.timeline, "Set main track", |tl| tl.set_main_track(id))
    }

    pub fn toggle_visible(&mut self, id: Uuid) -> Result<bool> {
        self.history
            .execute(&mut self.timeline, "Toggle visibility", |tl| tl.toggle_visible(id))
    }

    pub fn toggle_locked(&mut self, id: Uuid) -> Result<bool> {
        self.history
            .execute(&mut self.timeline, "Toggle lock", |tl| tl.toggle_locked(id))
    }

    pub fn rename_track(&mut self, id: Uuid, name: &str) -> Result<()> {
        self.history
            .execute(&mut self.timeline, "Rename track", |tl| tl.rename_track(id, name))
    }

    pub fn set_track_height(&mut self, id: Uuid, height: f32) -> Result<()> {
        self.history.execute(&mut self.timeline, "Resize track", |tl| {
            tl.set_track_height(id, height)
        })
    }

    pub fn duplicate_track(&mut self, id: Uuid) -> Result<Uuid> {
        self.history
            .execute(&mut self.timeline, "Duplicate track", |tl| tl.duplicate_track(id))
    }

    // ---- history ----

    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.timeline)?;
        self.selection.clear();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.timeline)?;
        self.selection.clear();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- view ----

    /// Start animating toward `value`. The returned token must come back in
    /// `Message::AnimationFrame` to advance the animation.
    pub fn set_zoom(&mut self, value: f64, center: ZoomCenter) -> AnimationToken {
        self.zoom.set_target(value, center, &self.viewport)
    }

    pub fn displayed_zoom(&self) -> f64 {
        self.zoom.current()
    }

    pub fn set_playhead(&mut self, time: f64) {
        self.playhead = time.max(0.0);
    }

    /// Aligned time of the active gesture's snap, for drawing a guide line.
    pub fn snap_guide(&self) -> Option<f64> {
        self.session.snap_guide()
    }

    pub fn layout(&self) -> Layout<'_> {
        Layout {
            timeline: &self.timeline,
            zoom: self.zoom.current(),
            scroll_offset: self.viewport.scroll_offset,
            ruler_height: self.settings.layout.ruler_height,
            edge_grab_px: self.settings.edge_grab_px,
        }
    }

    fn snap_tolerance_px(&self) -> Option<f64> {
        self.settings
            .snap
            .enabled
            .then_some(self.settings.snap.tolerance_px)
    }

    /// Surface a failed operation in the status line.
    fn report<T>(&mut self, action: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(action, error = %e, "operation rejected");
                self.status_message = format!("{action} failed: {e}");
                None
            }
        }
    }

    // ---- keyboard ----

    fn on_key(&mut self, key: Key, modifiers: Modifiers) {
        match shortcut_for(key, modifiers) {
            Some(shortcut) => self.run_shortcut(shortcut),
            None => debug!(?key, "unbound key"),
        }
    }

    fn run_shortcut(&mut self, shortcut: Shortcut) {
        if !self.session.is_idle() {
            debug!(?shortcut, "ignored during pointer gesture");
            return;
        }
        match shortcut {
            Shortcut::DeleteSelection => {
                let result = self.delete_selection();
                if let Some(count) = self.report("Delete", result) {
                    if count > 0 {
                        self.status_message = format!("Deleted {count} clip(s)");
                    }
                }
            }
            Shortcut::Undo => {
                let result = self.undo();
                if self.report("Undo", result).is_some() {
                    self.status_message = "Undone".into();
                }
            }
            Shortcut::Redo => {
                let result = self.redo();
                if self.report("Redo", result).is_some() {
                    self.status_message = "Redone".into();
                }
            }
            Shortcut::SelectAll => self.select_all(),
            Shortcut::ClearSelection => self.selection.clear(),
        }
    }

    // ---- pointer ----

    fn on_lane_pressed(&mut self, x: f64, y: f64, modifiers: Modifiers) {
        if !self.session.is_idle() {
            return;
        }
        let Some(hit) = self.layout().hit_test_clip(x, y) else {
            if !modifiers.any() {
                self.selection.clear();
            }
            return;
        };

        let plain = !modifiers.command() && !modifiers.shift;
        let edge = match hit.zone {
            HitZone::LeftEdge if plain => Some(ResizeEdge::Left),
            HitZone::RightEdge if plain => Some(ResizeEdge::Right),
            _ => None,
        };
        if let Some(edge) = edge {
            if let Some(resize) = ResizeSession::new(&self.timeline, hit.clip_id, edge, x) {
                if let Some(clip) = self.timeline.clip(hit.clip_id) {
                    self.selection.select_only(clip);
                }
                self.session = Session::Resizing(resize);
                return;
            }
        }

        let ids: Vec<Uuid> = if self.selection.contains(hit.clip_id) {
            self.selection.ids().to_vec()
        } else {
            if plain {
                if let Some(clip) = self.timeline.clip(hit.clip_id) {
                    self.selection.select_only(clip);
                }
            }
            vec![hit.clip_id]
        };

        match DragSession::new(&self.timeline, hit.clip_id, &ids, (x, y)) {
            Some(drag) => {
                self.session = Session::PendingClick {
                    clip_id: hit.clip_id,
                    modifiers,
                    drag,
                };
            }
            // Locked lane: the press is only a selection click.
            None => self.click_select(hit.clip_id, modifiers),
        }
    }

    fn click_select(&mut self, clip_id: Uuid, modifiers: Modifiers) {
        let Some(clip) = self.timeline.clip(clip_id).cloned() else {
            return;
        };
        if modifiers.command() {
            self.selection.toggle(&clip);
        } else if modifiers.shift {
            self.selection.extend_to(&self.timeline, &clip);
        } else {
            self.selection.select_only(&clip);
        }
    }

    fn on_pointer_moved(&mut self, x: f64, y: f64) {
        self.session = match std::mem::take(&mut self.session) {
            Session::PendingClick {
                clip_id,
                modifiers,
                mut drag,
            } => {
                let travel = (x - drag.origin_x).hypot(y - drag.origin_y);
                if travel > self.settings.drag_threshold_px {
                    debug!(clip = %clip_id, clips = drag.originals.len(), "drag started");
                    self.drag_frame(&mut drag, x, y);
                    Session::Dragging(drag)
                } else {
                    Session::PendingClick {
                        clip_id,
                        modifiers,
                        drag,
                    }
                }
            }
            Session::Dragging(mut drag) => {
                self.drag_frame(&mut drag, x, y);
                Session::Dragging(drag)
            }
            Session::Resizing(mut resize) => {
                self.resize_frame(&mut resize, x);
                Session::Resizing(resize)
            }
            Session::ReorderingTrack(mut reorder) => {
                reorder.over = self.layout().track_at_y_clamped(y);
                Session::ReorderingTrack(reorder)
            }
            Session::ScrubbingPlayhead => {
                self.playhead = self.layout().time_at_x(x).max(0.0);
                Session::ScrubbingPlayhead
            }
            Session::Idle => Session::Idle,
        };
    }

    fn drag_frame(&mut self, drag: &mut DragSession, x: f64, y: f64) {
        let hover_track = self
            .layout()
            .track_at_y(y)
            .and_then(|i| self.timeline.track_at(i))
            .map(|t| t.id);
        let frame = DragFrame {
            dx: x - drag.origin_x,
            hover_track,
            zoom: self.zoom.current(),
            playhead: self.playhead,
            snap_tolerance_px: self.snap_tolerance_px(),
        };
        let plan = drag.plan(&self.timeline, frame);

        let crossed = plan
            .cross_track
            .as_deref()
            .is_some_and(|placements| self.timeline.place_clips(placements).is_ok());
        if crossed || self.timeline.place_clips(&plan.in_place).is_ok() {
            drag.snap_guide = plan.snap.map(|hit| hit.align_time);
        } else {
            debug!(anchor = %drag.anchor_id, "drag frame rejected");
        }
    }

    fn resize_frame(&mut self, resize: &mut ResizeSession, x: f64) {
        let (start, duration, snap) = resize.propose(
            &self.timeline,
            x,
            self.zoom.current(),
            self.playhead,
            self.snap_tolerance_px(),
        );
        match self.timeline.set_clip_span(resize.clip_id, start, duration) {
            Ok(()) => resize.snap_guide = snap.map(|hit| hit.align_time),
            Err(e) => debug!(clip = %resize.clip_id, error = %e, "resize frame rejected"),
        }
    }

    fn on_pointer_released(&mut self) {
        match std::mem::take(&mut self.session) {
            Session::PendingClick {
                clip_id, modifiers, ..
            } => self.click_select(clip_id, modifiers),
            Session::Dragging(drag) => {
                if drag.has_moved(&self.timeline) {
                    let description = if drag.originals.len() > 1 {
                        "Move clips"
                    } else {
                        "Move clip"
                    };
                    self.history.record(&self.timeline, description);
                    info!(clips = drag.originals.len(), "clips moved");
                }
                self.selection.retain_existing(&self.timeline);
            }
            Session::Resizing(resize) => {
                if resize.has_changed(&self.timeline) {
                    self.history.record(&self.timeline, "Resize clip");
                }
            }
            Session::ReorderingTrack(reorder) => {
                if !reorder.is_noop() {
                    let result = self.reorder_track(reorder.from, reorder.over);
                    self.report("Reorder track", result);
                }
            }
            Session::ScrubbingPlayhead | Session::Idle => {}
        }
    }
}
