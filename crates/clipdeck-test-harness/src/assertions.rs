use uuid::Uuid;

use clipdeck_core::collision::intervals_overlap;
use clipdeck_core::timeline::{MIN_CLIP_DURATION, Timeline};

const EPSILON: f64 = 1e-9;

/// Assert that a track has a specific number of clips.
pub fn assert_track_clip_count(timeline: &Timeline, track_index: usize, expected: usize) {
    let track = &timeline.tracks[track_index];
    let count = timeline.clips_on_track(track.id).len();
    assert_eq!(
        count, expected,
        "track {track_index} has {count} clips, expected {expected}"
    );
}

/// Assert that no two clips on any track overlap.
pub fn assert_no_overlaps(timeline: &Timeline) {
    for track in &timeline.tracks {
        let clips = timeline.clips_on_track(track.id);
        for (i, a) in clips.iter().enumerate() {
            for b in clips.iter().skip(i + 1) {
                assert!(
                    !intervals_overlap(a.start, a.end(), b.start, b.end()),
                    "clips {} [{}, {}) and {} [{}, {}) overlap on track {}",
                    a.id,
                    a.start,
                    a.end(),
                    b.id,
                    b.start,
                    b.end(),
                    track.name
                );
            }
        }
    }
}

/// Assert every clip starts at or after zero and keeps the minimum duration.
pub fn assert_clip_bounds(timeline: &Timeline) {
    for clip in &timeline.clips {
        assert!(clip.start >= 0.0, "clip {} starts at {}", clip.id, clip.start);
        assert!(
            clip.duration >= MIN_CLIP_DURATION,
            "clip {} has duration {}",
            clip.id,
            clip.duration
        );
    }
}

/// Assert a clip occupies `[start, start + duration)`.
pub fn assert_clip_span(timeline: &Timeline, id: Uuid, start: f64, duration: f64) {
    let clip = timeline
        .clip(id)
        .unwrap_or_else(|| panic!("clip {id} not found"));
    assert!(
        (clip.start - start).abs() < EPSILON && (clip.duration - duration).abs() < EPSILON,
        "clip {id} spans [{}, {}), expected [{start}, {})",
        clip.start,
        clip.end(),
        start + duration
    );
}

/// Assert a clip lives on the track at `track_index`.
pub fn assert_clip_on_track(timeline: &Timeline, id: Uuid, track_index: usize) {
    let clip = timeline
        .clip(id)
        .unwrap_or_else(|| panic!("clip {id} not found"));
    assert_eq!(
        timeline.track_index(clip.track_id),
        Some(track_index),
        "clip {id} is not on track {track_index}"
    );
}

/// Assert track `order` values are 0..n in vector order.
pub fn assert_track_orders_dense(timeline: &Timeline) {
    for (i, track) in timeline.tracks.iter().enumerate() {
        assert_eq!(
            track.order, i,
            "track {} has order {}, expected {i}",
            track.name, track.order
        );
    }
}

/// Assert the track names, top to bottom.
pub fn assert_track_names(timeline: &Timeline, expected: &[&str]) {
    let names: Vec<&str> = timeline.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, expected);
}
