//! Time ↔ pixel conversion. Zoom is pixels per second.
//!
//! Nothing here clamps; callers decide what an out-of-range value means.

pub fn time_to_pixel(t: f64, zoom: f64) -> f64 {
    t * zoom
}

pub fn pixel_to_time(x: f64, zoom: f64) -> f64 {
    x / zoom
}

/// Screen x of a timeline time, given the current horizontal scroll offset.
pub fn time_to_screen(t: f64, zoom: f64, scroll_offset: f64) -> f64 {
    time_to_pixel(t, zoom) - scroll_offset
}

/// Timeline time under a screen x, given the current horizontal scroll offset.
pub fn screen_to_time(x: f64, zoom: f64, scroll_offset: f64) -> f64 {
    pixel_to_time(x + scroll_offset, zoom)
}
