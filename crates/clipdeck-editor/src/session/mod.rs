//! Pointer gestures. Exactly one is active at a time, owned by the editor.

pub mod drag;
pub mod reorder;
pub mod resize;

use uuid::Uuid;

use crate::message::Modifiers;

pub use drag::DragSession;
pub use reorder::TrackReorder;
pub use resize::{ResizeEdge, ResizeSession};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Idle,
    /// Pressed on a clip body; becomes a drag once the pointer travels past
    /// the threshold, or a selection click if released before that.
    PendingClick {
        clip_id: Uuid,
        modifiers: Modifiers,
        drag: DragSession,
    },
    Dragging(DragSession),
    Resizing(ResizeSession),
    ReorderingTrack(TrackReorder),
    ScrubbingPlayhead,
}

impl Session {
    pub fn is_idle(&self) -> bool {
        matches!(self, Session::Idle)
    }

    /// Aligned time of the current snap, if the gesture has one.
    pub fn snap_guide(&self) -> Option<f64> {
        match self {
            Session::Dragging(drag) => drag.snap_guide,
            Session::Resizing(resize) => resize.snap_guide,
            _ => None,
        }
    }
}
