//! Pointer gesture shortcuts for integration tests. Every helper goes through
//! `Editor::update`, so the session state machine sees real message sequences.

use uuid::Uuid;

use crate::editor::Editor;
use crate::message::{Effect, Message, Modifiers};
use crate::session::ResizeEdge;

impl Editor {
    /// Screen y at the vertical middle of the lane at `track_index`.
    pub fn lane_y(&self, track_index: usize) -> f64 {
        let height = self.timeline.tracks[track_index].height as f64;
        self.layout().track_top(track_index) + height / 2.0
    }

    /// Screen x of a timeline time at the displayed zoom.
    pub fn x_at(&self, time: f64) -> f64 {
        self.layout().x_at_time(time)
    }

    /// A point in the middle of a clip's body.
    pub fn clip_body_point(&self, id: Uuid) -> (f64, f64) {
        let clip = self.timeline.clip(id).expect("clip exists");
        let index = self.timeline.track_index(clip.track_id).expect("track exists");
        let mid = clip.start + clip.duration / 2.0;
        (self.x_at(mid), self.lane_y(index))
    }

    pub fn click_clip(&mut self, id: Uuid, modifiers: Modifiers) {
        let (x, y) = self.clip_body_point(id);
        self.update(Message::LanePressed { x, y, modifiers });
        self.update(Message::PointerReleased);
    }

    /// Press a clip body, move `dx` pixels (and onto `to_track` if given), release.
    pub fn drag_clip(&mut self, id: Uuid, dx: f64, to_track: Option<usize>) {
        let (x, y) = self.clip_body_point(id);
        self.update(Message::LanePressed {
            x,
            y,
            modifiers: Modifiers::NONE,
        });
        let target_y = to_track.map_or(y, |index| self.lane_y(index));
        self.update(Message::PointerMoved {
            x: x + dx,
            y: target_y,
        });
        self.update(Message::PointerReleased);
    }

    /// Grab one edge of a clip and move it `dx` pixels before releasing.
    pub fn drag_edge(&mut self, id: Uuid, edge: ResizeEdge, dx: f64) {
        let clip = self.timeline.clip(id).expect("clip exists");
        let index = self.timeline.track_index(clip.track_id).expect("track exists");
        let x = match edge {
            ResizeEdge::Left => self.x_at(clip.start) + 1.0,
            ResizeEdge::Right => self.x_at(clip.end()) - 1.0,
        };
        let y = self.lane_y(index);
        self.update(Message::LanePressed {
            x,
            y,
            modifiers: Modifiers::NONE,
        });
        self.update(Message::PointerMoved { x: x + dx, y });
        self.update(Message::PointerReleased);
    }

    /// Deliver animation frames until the editor stops asking for them.
    /// Returns how many frames were delivered.
    pub fn run_frames(&mut self, mut effect: Effect) -> usize {
        let mut frames = 0;
        while let Effect::RequestFrame(token) = effect {
            effect = self.update(Message::AnimationFrame(token));
            frames += 1;
            assert!(frames < 10_000, "zoom animation never settled");
        }
        frames
    }
}
