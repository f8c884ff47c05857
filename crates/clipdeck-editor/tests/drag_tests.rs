use clipdeck_core::settings::EditorSettings;
use clipdeck_core::timeline::Timeline;
use clipdeck_editor::editor::Editor;
use clipdeck_editor::message::{Message, Modifiers};
use clipdeck_editor::session::Session;
use clipdeck_test_harness::assertions::*;
use clipdeck_test_harness::builders::*;

fn editor_with(timeline: Timeline) -> Editor {
    Editor::with_timeline(timeline, EditorSettings::default())
}

#[test]
fn test_drag_moves_clip_by_pixels_over_zoom() {
    let timeline = TimelineBuilder::new().track("t1").clip(0, 0.0, 5.0).build();
    let id = clip_id(&timeline, 0, 0);
    let mut editor = editor_with(timeline);

    // 100 px at 50 px/s is two seconds.
    editor.drag_clip(id, 100.0, None);
    assert_clip_span(&editor.timeline, id, 2.0, 5.0);
    assert!(editor.session.is_idle());
    assert!(editor.can_undo());
}

#[test]
fn test_drag_commits_one_history_entry() {
    let timeline = TimelineBuilder::new().track("t1").clip(0, 0.0, 5.0).build();
    let id = clip_id(&timeline, 0, 0);
    let mut editor = editor_with(timeline);

    let (x, y) = editor.clip_body_point(id);
    editor.update(Message::LanePressed {
        x,
        y,
        modifiers: Modifiers::NONE,
    });
    for step in 1..=5 {
        editor.update(Message::PointerMoved {
            x: x + 20.0 * step as f64,
            y,
        });
    }
    editor.update(Message::PointerReleased);

    assert_clip_span(&editor.timeline, id, 2.0, 5.0);
    assert_eq!(editor.history.len(), 2);
    editor.undo().unwrap();
    assert_clip_span(&editor.timeline, id, 0.0, 5.0);
}

#[test]
fn test_drag_stops_at_timeline_start() {
    let timeline = TimelineBuilder::new().track("t1").clip(0, 1.0, 2.0).build();
    let id = clip_id(&timeline, 0, 0);
    let mut editor = editor_with(timeline);

    editor.drag_clip(id, -200.0, None);
    assert_clip_span(&editor.timeline, id, 0.0, 2.0);
    assert_clip_bounds(&editor.timeline);
}

#[test]
fn test_colliding_drag_frame_is_dropped() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .clip(0, 0.0, 5.0)
        .clip(0, 10.0, 5.0)
        .build();
    let a = clip_id(&timeline, 0, 0);
    let mut editor = editor_with(timeline);

    editor.drag_clip(a, 300.0, None);
    assert_clip_span(&editor.timeline, a, 0.0, 5.0);
    assert!(!editor.can_undo());
    assert_no_overlaps(&editor.timeline);
}

#[test]
fn test_drag_snaps_to_neighbor_edge() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .clip(0, 0.0, 5.0)
        .clip(0, 10.0, 5.0)
        .build();
    let b = clip_id(&timeline, 0, 1);
    let mut editor = editor_with(timeline);

    let (x, y) = editor.clip_body_point(b);
    editor.update(Message::LanePressed {
        x,
        y,
        modifiers: Modifiers::NONE,
    });
    // Lands 0.1s after the first clip's end, inside the 0.2s tolerance.
    editor.update(Message::PointerMoved { x: x - 245.0, y });
    assert_eq!(editor.snap_guide(), Some(5.0));
    editor.update(Message::PointerReleased);

    assert_clip_span(&editor.timeline, b, 5.0, 5.0);
    assert_eq!(editor.snap_guide(), None);
}

#[test]
fn test_drag_without_snap() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .clip(0, 0.0, 5.0)
        .clip(0, 10.0, 5.0)
        .build();
    let b = clip_id(&timeline, 0, 1);
    let mut editor = editor_with(timeline);
    editor.update(Message::ToggleSnap);

    editor.drag_clip(b, -245.0, None);
    let clip = editor.timeline.clip(b).unwrap();
    assert!((clip.start - 5.1).abs() < 1e-9);
}

#[test]
fn test_drag_to_another_track() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .track("t2")
        .clip(0, 0.0, 5.0)
        .build();
    let id = clip_id(&timeline, 0, 0);
    let mut editor = editor_with(timeline);

    editor.drag_clip(id, 0.0, Some(1));
    assert_clip_on_track(&editor.timeline, id, 1);
    assert_clip_span(&editor.timeline, id, 0.0, 5.0);
    assert_eq!(editor.selection.last_selected().map(|(_, t)| t), Some(editor.timeline.tracks[1].id));
}

#[test]
fn test_blocked_cross_track_move_stays_in_place() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .track("t2")
        .clip(0, 0.0, 5.0)
        .clip(1, 0.0, 5.0)
        .build();
    let id = clip_id(&timeline, 0, 0);
    let mut editor = editor_with(timeline);

    editor.drag_clip(id, 0.0, Some(1));
    assert_clip_on_track(&editor.timeline, id, 0);
    assert_no_overlaps(&editor.timeline);
}

#[test]
fn test_cannot_drag_onto_locked_track() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .with_track(TrackBuilder::new("locked").locked().build())
        .clip(0, 0.0, 5.0)
        .build();
    let id = clip_id(&timeline, 0, 0);
    let mut editor = editor_with(timeline);

    editor.drag_clip(id, 0.0, Some(1));
    assert_clip_on_track(&editor.timeline, id, 0);
}

#[test]
fn test_selected_clips_move_as_a_group() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .clip(0, 0.0, 5.0)
        .clip(0, 10.0, 5.0)
        .build();
    let a = clip_id(&timeline, 0, 0);
    let b = clip_id(&timeline, 0, 1);
    let mut editor = editor_with(timeline);

    editor.click_clip(a, Modifiers::NONE);
    editor.click_clip(b, Modifiers::ctrl());
    assert_eq!(editor.selection.len(), 2);

    editor.drag_clip(a, 100.0, None);
    assert_clip_span(&editor.timeline, a, 2.0, 5.0);
    assert_clip_span(&editor.timeline, b, 12.0, 5.0);

    editor.undo().unwrap();
    assert_clip_span(&editor.timeline, a, 0.0, 5.0);
    assert_clip_span(&editor.timeline, b, 10.0, 5.0);
}

#[test]
fn test_group_drag_is_clamped_by_leftmost_clip() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .clip(0, 1.0, 2.0)
        .clip(0, 10.0, 2.0)
        .build();
    let a = clip_id(&timeline, 0, 0);
    let b = clip_id(&timeline, 0, 1);
    let mut editor = editor_with(timeline);
    editor.update(Message::SelectAll);

    editor.drag_clip(b, -500.0, None);
    assert_clip_span(&editor.timeline, a, 0.0, 2.0);
    assert_clip_span(&editor.timeline, b, 9.0, 2.0);
    assert_clip_bounds(&editor.timeline);
}

#[test]
fn test_group_drag_rejects_when_any_clip_collides() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .track("t2")
        .clip(0, 0.0, 2.0)
        .clip(1, 0.0, 2.0)
        .clip(1, 5.0, 2.0)
        .build();
    let a = clip_id(&timeline, 0, 0);
    let b = clip_id(&timeline, 1, 0);
    let mut editor = editor_with(timeline);
    editor.click_clip(a, Modifiers::NONE);
    editor.click_clip(b, Modifiers::ctrl());

    // b would hit the clip at 5s, so a stays too.
    editor.drag_clip(a, 200.0, None);
    assert_clip_span(&editor.timeline, a, 0.0, 2.0);
    assert_clip_span(&editor.timeline, b, 0.0, 2.0);
}

#[test]
fn test_press_without_travel_is_a_click() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .clip(0, 0.0, 5.0)
        .clip(0, 10.0, 5.0)
        .build();
    let a = clip_id(&timeline, 0, 0);
    let b = clip_id(&timeline, 0, 1);
    let mut editor = editor_with(timeline);
    editor.update(Message::SelectAll);

    let (x, y) = editor.clip_body_point(a);
    editor.update(Message::LanePressed {
        x,
        y,
        modifiers: Modifiers::NONE,
    });
    editor.update(Message::PointerMoved { x: x + 2.0, y });
    assert!(matches!(editor.session, Session::PendingClick { .. }));
    editor.update(Message::PointerReleased);

    assert_clip_span(&editor.timeline, a, 0.0, 5.0);
    assert_eq!(editor.selection.ids(), &[a]);
    assert!(!editor.selection.contains(b));
}

#[test]
fn test_shift_click_selects_range() {
    let timeline = TimelineBuilder::new()
        .track("t1")
        .clip(0, 0.0, 2.0)
        .clip(0, 4.0, 2.0)
        .clip(0, 8.0, 2.0)
        .build();
    let ids: Vec<_> = (0..3).map(|n| clip_id(&timeline, 0, n)).collect();
    let mut editor = editor_with(timeline);

    editor.click_clip(ids[0], Modifiers::NONE);
    editor.click_clip(ids[2], Modifiers::shift());
    assert_eq!(editor.selection.len(), 3);

    editor.click_clip(ids[1], Modifiers::ctrl());
    assert!(!editor.selection.contains(ids[1]));
}

#[test]
fn test_clicking_empty_lane_clears_selection() {
    let timeline = TimelineBuilder::new().track("t1").clip(0, 0.0, 2.0).build();
    let mut editor = editor_with(timeline);
    editor.update(Message::SelectAll);

    let y = editor.lane_y(0);
    editor.update(Message::LanePressed {
        x: 800.0,
        y,
        modifiers: Modifiers::NONE,
    });
    editor.update(Message::PointerReleased);
    assert!(editor.selection.is_empty());
}

#[test]
fn test_locked_clip_can_be_selected_but_not_moved() {
    let timeline = TimelineBuilder::new()
        .with_track(TrackBuilder::new("locked").locked().build())
        .clip(0, 0.0, 5.0)
        .build();
    let id = clip_id(&timeline, 0, 0);
    let mut editor = editor_with(timeline);

    editor.drag_clip(id, 100.0, None);
    assert_clip_span(&editor.timeline, id, 0.0, 5.0);
    assert!(editor.selection.contains(id));
    assert!(editor.session.is_idle());
}
