//! Editor settings, persisted as JSON.
//!
//! Every field has a default so partial files load cleanly.

use std::fs;
use std::path::Path;

use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::commands::DEFAULT_HISTORY_CAPACITY;
use crate::error::{CoreError, Result};
use crate::timeline::{DEFAULT_TRACK_HEIGHT, MIN_CLIP_DURATION};

/// Settings schema version written by this build.
pub const SETTINGS_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    pub version: String,
    pub snap: SnapSettings,
    /// Close gaps left by deletes and cuts on the same track.
    pub ripple_enabled: bool,
    /// Pointer travel before a press on a clip becomes a drag.
    pub drag_threshold_px: f64,
    /// Width of the trim handle hit zone at each clip edge.
    pub edge_grab_px: f64,
    pub history_capacity: usize,
    pub zoom: ZoomSettings,
    pub layout: LayoutSettings,
    pub drop_collision: DropCollision,
    /// Duration given to clips created from an asset drop, in seconds.
    pub default_drop_duration: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION.to_string(),
            snap: SnapSettings::default(),
            ripple_enabled: false,
            drag_threshold_px: 3.0,
            edge_grab_px: 8.0,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            zoom: ZoomSettings::default(),
            layout: LayoutSettings::default(),
            drop_collision: DropCollision::default(),
            default_drop_duration: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapSettings {
    pub enabled: bool,
    pub tolerance_px: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance_px: 10.0,
        }
    }
}

/// Zoom is pixels per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomSettings {
    pub min: f64,
    pub max: f64,
    pub initial: f64,
    /// Fraction of the remaining gap closed per animation frame.
    pub ease: f64,
    /// Gap below which the animation snaps to the target.
    pub epsilon: f64,
    /// Wheel notches change zoom by this fraction of the current value.
    pub wheel_factor: f64,
    /// Multiplier for the zoom in/out buttons.
    pub step: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min: 10.0,
            max: 100.0,
            initial: 50.0,
            ease: 0.15,
            epsilon: 0.1,
            wheel_factor: 0.15,
            step: 1.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutSettings {
    /// Height of the time ruler above the first track lane.
    pub ruler_height: f64,
    pub default_track_height: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            ruler_height: 24.0,
            default_track_height: DEFAULT_TRACK_HEIGHT,
        }
    }
}

/// What an asset drop does when the requested spot is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DropCollision {
    Reject,
    #[default]
    NextFreeSlot,
}

impl EditorSettings {
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load settings, rejecting files written by an incompatible major version.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.check_version()?;
        settings.validate()?;
        info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Reject values the zoom animation and pixel math cannot work with.
    pub fn validate(&self) -> Result<()> {
        let zoom = &self.zoom;
        let checks: [(&'static str, bool, &str); 9] = [
            ("zoom.min", zoom.min.is_finite() && zoom.min > 0.0, "must be a positive number"),
            ("zoom.max", zoom.max.is_finite() && zoom.max >= zoom.min, "must not be below zoom.min"),
            ("zoom.initial", zoom.initial.is_finite(), "must be a number"),
            ("zoom.ease", zoom.ease > 0.0 && zoom.ease <= 1.0, "must be in (0, 1]"),
            ("zoom.epsilon", zoom.epsilon.is_finite() && zoom.epsilon > 0.0, "must be positive"),
            ("zoom.step", zoom.step.is_finite() && zoom.step > 0.0, "must be positive"),
            (
                "snap.tolerancePx",
                self.snap.tolerance_px.is_finite() && self.snap.tolerance_px >= 0.0,
                "must not be negative",
            ),
            (
                "dragThresholdPx",
                self.drag_threshold_px.is_finite() && self.drag_threshold_px >= 0.0,
                "must not be negative",
            ),
            (
                "defaultDropDuration",
                self.default_drop_duration.is_finite()
                    && self.default_drop_duration >= MIN_CLIP_DURATION,
                "must be at least the minimum clip duration",
            ),
        ];
        match checks.into_iter().find(|(_, ok, _)| !ok) {
            Some((field, _, reason)) => {
                warn!(field, reason, "invalid settings");
                Err(CoreError::InvalidSettings {
                    field,
                    reason: reason.to_string(),
                })
            }
            None => Ok(()),
        }
    }

    fn check_version(&self) -> Result<()> {
        let found = Version::parse(&self.version)?;
        let expected = Version::parse(SETTINGS_VERSION)?;
        if found.major != expected.major {
            warn!(%found, %expected, "incompatible settings version");
            return Err(CoreError::IncompatibleSettings {
                found: found.to_string(),
                expected: expected.to_string(),
            });
        }
        Ok(())
    }
}
