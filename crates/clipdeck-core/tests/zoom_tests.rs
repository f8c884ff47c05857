use clipdeck_core::settings::ZoomSettings;
use clipdeck_core::zoom::*;

fn controller() -> ZoomController {
    ZoomController::new(&ZoomSettings::default())
}

fn settle(zoom: &mut ZoomController, token: AnimationToken, viewport: &mut Viewport, playhead: f64) -> usize {
    let mut frames = 0;
    loop {
        frames += 1;
        match zoom.tick(token, viewport, playhead) {
            ZoomTick::Animating => assert!(frames < 1_000, "zoom never settled"),
            ZoomTick::Settled => return frames,
            ZoomTick::Stale => panic!("token went stale"),
        }
    }
}

#[test]
fn test_zoom_converges_exactly_without_overshoot() {
    let mut zoom = controller();
    let mut viewport = Viewport::default();
    let token = zoom.set_target(100.0, ZoomCenter::KeepScroll, &viewport);

    let mut previous = zoom.current();
    while zoom.tick(token, &mut viewport, 0.0) == ZoomTick::Animating {
        assert!(zoom.current() > previous);
        assert!(zoom.current() <= 100.0);
        previous = zoom.current();
    }
    assert_eq!(zoom.current(), 100.0);
    assert!(!zoom.is_animating());
}

#[test]
fn test_current_changes_only_on_tick() {
    let mut zoom = controller();
    let viewport = Viewport::default();
    zoom.set_target(80.0, ZoomCenter::KeepScroll, &viewport);
    assert_eq!(zoom.target(), 80.0);
    assert_eq!(zoom.current(), 50.0);
}

#[test]
fn test_superseded_token_is_stale() {
    let mut zoom = controller();
    let mut viewport = Viewport::default();
    let old = zoom.set_target(80.0, ZoomCenter::KeepScroll, &viewport);
    let new = zoom.set_target(20.0, ZoomCenter::KeepScroll, &viewport);

    assert_eq!(zoom.tick(old, &mut viewport, 0.0), ZoomTick::Stale);
    assert_eq!(zoom.current(), 50.0);
    assert_eq!(zoom.tick(new, &mut viewport, 0.0), ZoomTick::Animating);
    assert!(zoom.current() < 50.0);
}

#[test]
fn test_retarget_continues_from_displayed_value() {
    let mut zoom = controller();
    let mut viewport = Viewport::default();
    let token = zoom.set_target(100.0, ZoomCenter::KeepScroll, &viewport);
    for _ in 0..3 {
        zoom.tick(token, &mut viewport, 0.0);
    }
    let displayed = zoom.current();

    let token = zoom.set_target(20.0, ZoomCenter::KeepScroll, &viewport);
    assert_eq!(zoom.current(), displayed);
    settle(&mut zoom, token, &mut viewport, 0.0);
    assert_eq!(zoom.current(), 20.0);
}

#[test]
fn test_finished_animation_tokens_are_stale() {
    let mut zoom = controller();
    let mut viewport = Viewport::default();
    let token = zoom.set_target(60.0, ZoomCenter::KeepScroll, &viewport);
    settle(&mut zoom, token, &mut viewport, 0.0);
    assert_eq!(zoom.tick(token, &mut viewport, 0.0), ZoomTick::Stale);
}

#[test]
fn test_cursor_anchor_stays_under_pointer() {
    let mut zoom = controller();
    let mut viewport = Viewport::default();
    // At 50 px/s the pointer at x=200 is over t=4s.
    let token = zoom.set_target(100.0, ZoomCenter::Cursor { pointer_x: 200.0 }, &viewport);

    while zoom.tick(token, &mut viewport, 0.0) == ZoomTick::Animating {
        let time_under_pointer = (200.0 + viewport.scroll_offset) / zoom.current();
        assert!((time_under_pointer - 4.0).abs() < 1e-9);
    }
    assert_eq!(viewport.scroll_offset, 200.0);
}

#[test]
fn test_playhead_centering() {
    let mut zoom = controller();
    let mut viewport = Viewport {
        scroll_offset: 0.0,
        width: 1000.0,
    };
    let token = zoom.set_target(100.0, ZoomCenter::Playhead, &viewport);
    settle(&mut zoom, token, &mut viewport, 30.0);
    assert_eq!(viewport.scroll_offset, 2500.0);
}

#[test]
fn test_scroll_never_goes_negative() {
    let mut zoom = controller();
    let mut viewport = Viewport {
        scroll_offset: 300.0,
        width: 1000.0,
    };
    let token = zoom.set_target(100.0, ZoomCenter::Playhead, &viewport);
    settle(&mut zoom, token, &mut viewport, 1.0);
    assert_eq!(viewport.scroll_offset, 0.0);
}

#[test]
fn test_keep_scroll_leaves_viewport_alone() {
    let mut zoom = controller();
    let mut viewport = Viewport {
        scroll_offset: 120.0,
        width: 800.0,
    };
    let token = zoom.set_target(20.0, ZoomCenter::KeepScroll, &viewport);
    settle(&mut zoom, token, &mut viewport, 10.0);
    assert_eq!(viewport.scroll_offset, 120.0);
}

#[test]
fn test_set_immediate() {
    let mut zoom = controller();
    let mut viewport = Viewport::default();
    zoom.set_immediate(25.0, ZoomCenter::Playhead, &mut viewport, 100.0);
    assert_eq!(zoom.current(), 25.0);
    assert!(!zoom.is_animating());
    assert_eq!(viewport.scroll_offset, 2000.0);
}

#[test]
fn test_button_and_fit_targets() {
    let zoom = controller();
    let viewport = Viewport::default();
    assert_eq!(zoom.zoom_in_target(), 62.5);
    assert_eq!(zoom.zoom_out_target(), 40.0);

    assert_eq!(zoom.fit_target(15.0, &viewport), 50.0);
    // Short timelines are padded to ten seconds.
    assert_eq!(zoom.fit_target(0.0, &viewport), 100.0);
    assert_eq!(zoom.fit_target(500.0, &viewport), 10.0);
}
