//! Animated zoom with optional re-centering of the viewport.
//!
//! `target` changes immediately on input; `current` (what everything is drawn
//! and measured with) eases toward it one frame at a time. Every new target
//! bumps a generation counter, so a frame callback scheduled for an older
//! target is recognised as stale and dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::screen_to_time;
use crate::settings::ZoomSettings;

/// Which point stays fixed on screen while zooming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ZoomCenter {
    /// Leave the scroll offset alone.
    #[default]
    KeepScroll,
    /// Keep the time under this screen x in place.
    Cursor { pointer_x: f64 },
    /// Keep the playhead in the middle of the viewport.
    Playhead,
}

/// Horizontal window onto the timeline, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_offset: f64,
    pub width: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_offset: 0.0,
            width: 1000.0,
        }
    }
}

/// Identifies the animation a frame callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomTick {
    /// Still easing; schedule another frame.
    Animating,
    /// Reached the target this frame.
    Settled,
    /// The token belongs to a superseded or finished animation.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Anchor {
    Time { time: f64, pointer_x: f64 },
    Playhead,
}

#[derive(Debug, Clone)]
pub struct ZoomController {
    current: f64,
    target: f64,
    min: f64,
    max: f64,
    ease: f64,
    epsilon: f64,
    wheel_factor: f64,
    step: f64,
    generation: u64,
    animating: bool,
    anchor: Option<Anchor>,
}

impl ZoomController {
    pub fn new(settings: &ZoomSettings) -> Self {
        // Unvalidated bounds are repaired so `clamp` never sees min > max.
        let min = settings.min.max(f64::MIN_POSITIVE);
        let max = settings.max.max(min);
        let initial = settings.initial.max(min).min(max);
        Self {
            current: initial,
            target: initial,
            min,
            max,
            ease: settings.ease,
            epsilon: settings.epsilon,
            wheel_factor: settings.wheel_factor,
            step: settings.step,
            generation: 0,
            animating: false,
            anchor: None,
        }
    }

    /// The displayed zoom, used for all pixel math.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }

    /// Request a new zoom. Easing continues from the displayed value; any
    /// animation already in flight is superseded.
    pub fn set_target(&mut self, value: f64, center: ZoomCenter, viewport: &Viewport) -> AnimationToken {
        self.target = self.clamp(value);
        self.anchor = match center {
            ZoomCenter::KeepScroll => None,
            ZoomCenter::Cursor { pointer_x } => Some(Anchor::Time {
                time: screen_to_time(pointer_x, self.current, viewport.scroll_offset),
                pointer_x,
            }),
            ZoomCenter::Playhead => Some(Anchor::Playhead),
        };
        self.generation += 1;
        self.animating = true;
        debug!(zoom = self.target, generation = self.generation, "zoom target set");
        AnimationToken(self.generation)
    }

    /// Jump straight to `value` with no animation.
    pub fn set_immediate(&mut self, value: f64, center: ZoomCenter, viewport: &mut Viewport, playhead: f64) {
        let token = self.set_target(value, center, viewport);
        self.current = self.target;
        self.recenter(viewport, playhead);
        self.finish(token);
    }

    /// Target for one zoom-in button press.
    pub fn zoom_in_target(&self) -> f64 {
        self.clamp(self.current * self.step)
    }

    pub fn zoom_out_target(&self) -> f64 {
        self.clamp(self.current / self.step)
    }

    /// Target for a wheel notch; positive `delta` zooms out, like a wheel
    /// scrolled toward the user.
    pub fn wheel_target(&self, delta: f64) -> f64 {
        let change = self.current * self.wheel_factor;
        if delta > 0.0 {
            self.clamp(self.current - change)
        } else if delta < 0.0 {
            self.clamp(self.current + change)
        } else {
            self.current
        }
    }

    /// Zoom that fits `duration` seconds (plus a little tail) into the viewport.
    pub fn fit_target(&self, duration: f64, viewport: &Viewport) -> f64 {
        let span = duration.max(5.0) + 5.0;
        self.clamp(viewport.width / span)
    }

    /// Advance the animation by one frame.
    pub fn tick(&mut self, token: AnimationToken, viewport: &mut Viewport, playhead: f64) -> ZoomTick {
        if token.0 != self.generation || !self.animating {
            return ZoomTick::Stale;
        }

        self.current += (self.target - self.current) * self.ease;
        let settled = (self.target - self.current).abs() < self.epsilon;
        if settled {
            self.current = self.target;
        }
        self.recenter(viewport, playhead);

        if settled {
            self.finish(token);
            ZoomTick::Settled
        } else {
            ZoomTick::Animating
        }
    }

    fn finish(&mut self, token: AnimationToken) {
        if token.0 == self.generation {
            self.animating = false;
            self.anchor = None;
        }
    }

    fn recenter(&self, viewport: &mut Viewport, playhead: f64) {
        let scroll = match self.anchor {
            None => return,
            Some(Anchor::Time { time, pointer_x }) => time * self.current - pointer_x,
            Some(Anchor::Playhead) => playhead * self.current - viewport.width / 2.0,
        };
        viewport.scroll_offset = scroll.max(0.0);
    }
}
