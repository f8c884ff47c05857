use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("clip not found: {0}")]
    ClipNotFound(Uuid),

    #[error("track not found: {0}")]
    TrackNotFound(Uuid),

    #[error("track index out of range: {0}")]
    TrackIndexOutOfRange(usize),

    #[error("track {0} is locked")]
    TrackLocked(Uuid),

    #[error("cannot remove the last remaining track")]
    LastTrack,

    #[error("clip overlap detected on track {track_id} at {start:.3}s")]
    ClipOverlap { track_id: Uuid, start: f64 },

    #[error("clip start {0:.3}s is before the timeline origin")]
    NegativeStart(f64),

    #[error("invalid clip duration: {0}")]
    InvalidDuration(f64),

    #[error("cut position {position:.3}s is outside clip bounds")]
    CutOutsideClip { position: f64 },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("settings version {found} is incompatible with {expected}")]
    IncompatibleSettings { found: String, expected: String },

    #[error("invalid setting {field}: {reason}")]
    InvalidSettings { field: &'static str, reason: String },

    #[error("invalid version: {0}")]
    Version(#[from] semver::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
