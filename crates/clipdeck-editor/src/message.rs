use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clipdeck_core::ripple::CutSide;
use clipdeck_core::timeline::{Clip, ClipKind, RemoveTrackPolicy};
use clipdeck_core::zoom::{AnimationToken, ZoomCenter};

/// Keyboard modifier state at the time of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Cmd on macOS.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    /// Ctrl or Cmd.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Char(char),
}

/// An asset dragged in from outside the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropRequest {
    pub track_index: usize,
    pub time: f64,
    pub name: String,
    pub kind: ClipKind,
}

/// Everything the editor reacts to. Pointer coordinates are relative to the
/// top-left of the timeline area: x is measured from the start of the lanes
/// (before scrolling is applied), y from the top of the ruler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Message {
    // Pointer
    LanePressed { x: f64, y: f64, modifiers: Modifiers },
    RulerPressed { x: f64 },
    TrackHeaderPressed { y: f64 },
    PointerMoved { x: f64, y: f64 },
    PointerReleased,
    Wheel { delta: f64, pointer_x: f64, modifiers: Modifiers },

    // Keyboard
    KeyPressed { key: Key, modifiers: Modifiers },

    // View
    AnimationFrame(AnimationToken),
    SetZoom { value: f64, center: ZoomCenter },
    ZoomIn,
    ZoomOut,
    ZoomToFit,
    ViewportResized { width: f64 },
    SetPlayhead(f64),

    // Clips
    AssetDropped(DropRequest),
    AddClip(Clip),
    MoveClip { id: Uuid, dt: f64 },
    UpdateClip { id: Uuid, start_delta: f64, duration_delta: f64 },
    RemoveClip(Uuid),
    DuplicateClip(Uuid),
    SplitAtPlayhead,
    CutAndDelete(CutSide),

    // Tracks
    AddTrack { name: String },
    RemoveTrack { id: Uuid, policy: RemoveTrackPolicy },
    ReorderTrack { from: usize, to: usize },
    SetMainTrack(Uuid),
    ToggleVisible(Uuid),
    ToggleLocked(Uuid),
    RenameTrack { id: Uuid, name: String },
    SetTrackHeight { id: Uuid, height: f32 },
    DuplicateTrack(Uuid),

    // Modes
    ToggleSnap,
    ToggleRipple,

    // Edit
    Undo,
    Redo,
    SelectAll,
    ClearSelection,
    DeleteSelection,
}

impl Message {
    /// True for messages that change clips, tracks, history or selection.
    /// These are refused while a pointer gesture owns the timeline.
    pub fn edits_timeline(&self) -> bool {
        matches!(
            self,
            Message::AssetDropped(_)
                | Message::AddClip(_)
                | Message::MoveClip { .. }
                | Message::UpdateClip { .. }
                | Message::RemoveClip(_)
                | Message::DuplicateClip(_)
                | Message::SplitAtPlayhead
                | Message::CutAndDelete(_)
                | Message::AddTrack { .. }
                | Message::RemoveTrack { .. }
                | Message::ReorderTrack { .. }
                | Message::SetMainTrack(_)
                | Message::ToggleVisible(_)
                | Message::ToggleLocked(_)
                | Message::RenameTrack { .. }
                | Message::SetTrackHeight { .. }
                | Message::DuplicateTrack(_)
                | Message::Undo
                | Message::Redo
                | Message::SelectAll
                | Message::ClearSelection
                | Message::DeleteSelection
        )
    }
}

/// Follow-up work the integrator must schedule after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Deliver `Message::AnimationFrame(token)` on the next frame.
    RequestFrame(AnimationToken),
}
