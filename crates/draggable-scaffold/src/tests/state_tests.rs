use super::*;

use draggable_animation::{snap, spring, tween};
use draggable_core::FRAME_INTERVAL_60HZ_NANOS;
use std::cell::RefCell;
use std::rc::Rc;

fn state_with(
    config: DraggableScaffoldConfig,
    left: f32,
    right: f32,
    fg: f32,
) -> DraggableScaffoldState {
    let state = DraggableScaffoldState::new(config);
    state.on_foreground_measured(fg);
    state.on_left_panel_measured(left);
    state.on_right_panel_measured(right);
    state
}

/// Drains frames at 60Hz until the clock has nothing left. Returns the number
/// of frames drained.
fn run_frames(clock: &FrameClock, start_nanos: u64) -> usize {
    let mut now = start_nanos;
    let mut frames = 0;
    while clock.has_frame_callbacks() {
        assert!(frames < 10_000, "glide never settled");
        clock.drain_frame_callbacks(now);
        now += FRAME_INTERVAL_60HZ_NANOS;
        frames += 1;
    }
    frames
}

fn record_events(state: &DraggableScaffoldState) -> Rc<RefCell<Vec<ScaffoldEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    state.add_listener(move |event| sink.borrow_mut().push(*event));
    events
}

#[test]
fn release_past_snap_offset_expands_left() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);

    assert_eq!(state.drag_by(60.0), 60.0);
    assert_eq!(state.target_state(), ExpandState::ExpandedLeft);

    let glide = state.on_drag_end(snap());
    run_frames(&state.frame_clock(), 0);

    assert_eq!(glide.outcome(), Some(GlideOutcome::Finished(ExpandState::ExpandedLeft)));
    assert_eq!(state.offset_x(), 100.0);
    assert_eq!(state.current_state(), ExpandState::ExpandedLeft);
}

#[test]
fn release_below_snap_offset_collapses() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);

    state.drag_by(40.0);
    assert_eq!(state.target_state(), ExpandState::Collapsed);

    state.on_drag_end(snap());
    run_frames(&state.frame_clock(), 0);
    assert_eq!(state.offset_x(), 0.0);
    assert_eq!(state.current_state(), ExpandState::Collapsed);
}

#[test]
fn snap_threshold_is_strict() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 80.0, 320.0);
    state.drag_by(50.0);
    assert_eq!(state.target_state(), ExpandState::Collapsed);

    state.drag_by(-50.0);
    state.drag_by(-41.0);
    assert_eq!(state.target_state(), ExpandState::ExpandedRight);
}

#[test]
fn full_width_swipe_takes_precedence_over_partial_reveal() {
    let config = DraggableScaffoldConfig::default()
        .with_allow_full_width_swipe(true)
        .with_full_width_swipe_offset(0.5);
    let state = state_with(config, 0.0, 50.0, 300.0);

    state.drag_by(-200.0);
    assert_eq!(state.offset_x(), -200.0);
    assert_eq!(state.right_progress(), 4.0);
    assert!((state.right_full_progress() - 0.6667).abs() < 1e-3);
    assert_eq!(state.target_state(), ExpandState::ExpandedFullRight);

    state.on_drag_end(snap());
    run_frames(&state.frame_clock(), 0);
    assert_eq!(state.offset_x(), -300.0);
    assert_eq!(state.current_state(), ExpandState::ExpandedFullRight);
}

#[test]
fn full_width_swipe_to_the_left_mirrors_right() {
    let config = DraggableScaffoldConfig::default().with_allow_full_width_swipe(true);
    let state = state_with(config, 100.0, 0.0, 300.0);

    state.drag_by(200.0);
    assert_eq!(state.left_progress(), 2.0);
    assert_eq!(state.target_state(), ExpandState::ExpandedFullLeft);

    state.on_drag_end(snap());
    run_frames(&state.frame_clock(), 0);
    assert_eq!(state.offset_x(), 300.0);
    assert_eq!(state.current_state(), ExpandState::ExpandedFullLeft);
}

#[test]
fn full_width_target_without_panel_is_the_origin() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 300.0);
    assert_eq!(state.offset_for(ExpandState::ExpandedFullRight), 0.0);
    assert_eq!(state.offset_for(ExpandState::ExpandedFullLeft), 300.0);
    assert_eq!(state.offset_for(ExpandState::ExpandedRight), 0.0);
}

#[test]
fn drag_is_clamped_to_panel_widths() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 80.0, 320.0);

    assert_eq!(state.drag_by(500.0), 100.0);
    assert_eq!(state.offset_x(), 100.0);
    assert_eq!(state.drag_by(-1000.0), -180.0);
    assert_eq!(state.offset_x(), -80.0);
    assert_eq!((state.lower_bound(), state.upper_bound()), (-80.0, 100.0));
}

#[test]
fn full_width_swipe_widens_bounds_to_foreground() {
    let config = DraggableScaffoldConfig::default().with_allow_full_width_swipe(true);
    let state = state_with(config, 100.0, 80.0, 320.0);

    state.drag_by(-1000.0);
    assert_eq!(state.offset_x(), -320.0);
    state.drag_by(5000.0);
    assert_eq!(state.offset_x(), 320.0);
}

#[test]
fn drag_resistance_scales_delta() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 80.0, 320.0);
    assert_eq!(state.on_drag(40.0, DragResistance::STRONG), 20.0);
    assert_eq!(state.on_drag(10.0, DragResistance::WEAK), 20.0);
    assert_eq!(state.offset_x(), 40.0);

    let weak = state_with(
        DraggableScaffoldConfig::default().with_drag_resistance(DragResistance::WEAK),
        100.0,
        80.0,
        320.0,
    );
    weak.drag_by(30.0);
    assert_eq!(weak.offset_x(), 60.0);
}

#[test]
fn unmeasured_panels_report_zero_progress() {
    let state = DraggableScaffoldState::new(DraggableScaffoldConfig::default());
    assert_eq!(state.left_progress(), 0.0);
    assert_eq!(state.right_progress(), 0.0);
    assert_eq!(state.left_full_progress(), 0.0);
    assert_eq!(state.right_full_progress(), 0.0);
    assert_eq!(state.drag_by(50.0), 0.0);
    assert_eq!(state.target_state(), ExpandState::Collapsed);
}

#[test]
fn remeasuring_same_width_is_idempotent() {
    let config =
        DraggableScaffoldConfig::default().with_default_expand_state(ExpandState::ExpandedLeft);
    let state = DraggableScaffoldState::new(config);
    let events = record_events(&state);

    state.on_left_panel_measured(100.0);
    assert_eq!(state.offset_x(), 100.0);
    assert_eq!(
        *events.borrow(),
        vec![
            ScaffoldEvent::OffsetChanged { offset_x: 100.0 },
            ScaffoldEvent::CurrentStateChanged {
                previous: ExpandState::Collapsed,
                current: ExpandState::ExpandedLeft,
            },
            ScaffoldEvent::TargetStateChanged {
                previous: ExpandState::Collapsed,
                current: ExpandState::ExpandedLeft,
            },
        ]
    );

    events.borrow_mut().clear();
    state.drag_by(-30.0);
    events.borrow_mut().clear();
    state.on_left_panel_measured(100.0);
    assert_eq!(state.offset_x(), 70.0);
    assert!(events.borrow().is_empty());
}

#[test]
fn width_change_reapplies_default_state() {
    let config =
        DraggableScaffoldConfig::default().with_default_expand_state(ExpandState::ExpandedRight);
    let state = state_with(config, 0.0, 80.0, 320.0);
    assert_eq!(state.offset_x(), -80.0);
    assert_eq!(state.current_state(), ExpandState::ExpandedRight);

    state.on_right_panel_measured(120.0);
    assert_eq!(state.offset_x(), -120.0);
    assert_eq!(state.current_state(), ExpandState::ExpandedRight);
}

#[test]
fn invalid_widths_are_treated_as_unmeasured() {
    let state = DraggableScaffoldState::new(DraggableScaffoldConfig::default());
    state.on_left_panel_measured(-20.0);
    state.on_right_panel_measured(f32::NAN);
    assert_eq!(state.left_panel_width(), 0.0);
    assert_eq!(state.right_panel_width(), 0.0);
}

#[test]
fn foreground_measurement_does_not_move_offset() {
    let config =
        DraggableScaffoldConfig::default().with_default_expand_state(ExpandState::ExpandedLeft);
    let state = state_with(config, 100.0, 0.0, 320.0);
    state.drag_by(-10.0);
    state.on_foreground_measured(400.0);
    assert_eq!(state.offset_x(), 90.0);
    assert_eq!(state.foreground_width(), 400.0);
}

#[test]
fn current_state_requires_exact_rest_offset() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    state.drag_by(99.5);
    assert_eq!(state.current_state(), ExpandState::Collapsed);
    assert_eq!(state.target_state(), ExpandState::ExpandedLeft);

    state.drag_by(0.5);
    assert_eq!(state.current_state(), ExpandState::ExpandedLeft);
}

#[test]
fn tween_glide_settles_exactly_on_target() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    state.set_expand_state(ExpandState::ExpandedLeft);

    let glide = state.animate_to_state(ExpandState::Collapsed, tween(300));
    assert!(state.is_animating());
    let frames = run_frames(&state.frame_clock(), 5_000);

    assert!(frames >= 18, "took {frames} frames");
    assert_eq!(state.offset_x(), 0.0);
    assert_eq!(glide.outcome(), Some(GlideOutcome::Finished(ExpandState::Collapsed)));
    assert!(!state.is_animating());
}

#[test]
fn spring_glide_settles_exactly_on_target() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 80.0, 320.0);

    let glide = state.animate_to_state(ExpandState::ExpandedRight, spring(0.5, 1500.0));
    run_frames(&state.frame_clock(), 0);

    assert_eq!(state.offset_x(), -80.0);
    assert_eq!(state.current_state(), ExpandState::ExpandedRight);
    assert!(glide.is_complete());
}

#[test]
fn glide_to_current_offset_finishes_immediately() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    let events = record_events(&state);

    let glide = state.animate_to_state(ExpandState::Collapsed, tween(300));

    assert_eq!(glide.outcome(), Some(GlideOutcome::Finished(ExpandState::Collapsed)));
    assert!(!state.frame_clock().has_frame_callbacks());
    assert_eq!(
        *events.borrow(),
        vec![ScaffoldEvent::GlideFinished {
            state: ExpandState::Collapsed
        }]
    );
}

#[test]
fn disabled_gesture_ignores_drags_but_animates() {
    let config = DraggableScaffoldConfig::default().with_drag_gesture_enabled(false);
    let state = state_with(config, 100.0, 80.0, 320.0);

    assert_eq!(state.drag_by(60.0), 0.0);
    assert_eq!(state.on_drag(60.0, DragResistance::WEAK), 0.0);
    assert_eq!(state.offset_x(), 0.0);
    assert_eq!(state.config().effective_drag_resistance(), DragResistance::ZERO);

    state.animate_to_state(ExpandState::ExpandedLeft, tween(1000));
    run_frames(&state.frame_clock(), 0);
    assert_eq!(state.current_state(), ExpandState::ExpandedLeft);
}

#[test]
fn disabled_gesture_does_not_interrupt_glide() {
    let config = DraggableScaffoldConfig::default().with_drag_gesture_enabled(false);
    let state = state_with(config, 100.0, 80.0, 320.0);

    let glide = state.animate_to_state(ExpandState::ExpandedLeft, tween(300));
    state.frame_clock().drain_frame_callbacks(0);
    state.drag_by(-30.0);

    assert!(state.is_animating());
    run_frames(&state.frame_clock(), FRAME_INTERVAL_60HZ_NANOS);
    assert!(glide.is_complete());
}

#[test]
fn drag_supersedes_glide_in_flight() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    state.set_expand_state(ExpandState::ExpandedLeft);
    let events = record_events(&state);

    let glide = state.animate_to_state(ExpandState::Collapsed, tween(300));
    let clock = state.frame_clock();
    clock.drain_frame_callbacks(0);
    clock.drain_frame_callbacks(FRAME_INTERVAL_60HZ_NANOS * 3);
    let mid_flight = state.offset_x();
    assert!(mid_flight < 100.0 && mid_flight > 0.0, "{mid_flight}");

    events.borrow_mut().clear();
    state.drag_by(-10.0);

    assert_eq!(glide.outcome(), Some(GlideOutcome::Cancelled));
    assert!(!state.is_animating());
    assert!(!clock.has_frame_callbacks());
    assert_eq!(state.offset_x(), mid_flight - 10.0);
    assert_eq!(
        events.borrow().last(),
        Some(&ScaffoldEvent::GlideCancelled {
            state: ExpandState::Collapsed
        })
    );
}

#[test]
fn second_animation_supersedes_first() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 80.0, 320.0);

    let first = state.animate_to_state(ExpandState::ExpandedLeft, tween(300));
    state.frame_clock().drain_frame_callbacks(0);
    state.frame_clock().drain_frame_callbacks(FRAME_INTERVAL_60HZ_NANOS);

    let second = state.animate_to_state(ExpandState::ExpandedRight, tween(300));
    assert_eq!(first.outcome(), Some(GlideOutcome::Cancelled));
    assert_eq!(state.frame_clock().pending_callback_count(), 1);

    run_frames(&state.frame_clock(), FRAME_INTERVAL_60HZ_NANOS * 2);
    assert_eq!(second.outcome(), Some(GlideOutcome::Finished(ExpandState::ExpandedRight)));
    assert_eq!(state.offset_x(), -80.0);
}

#[test]
fn set_expand_state_jumps_and_cancels_glide() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 80.0, 320.0);
    let glide = state.animate_to_state(ExpandState::ExpandedLeft, tween(300));

    state.set_expand_state(ExpandState::ExpandedRight);
    assert_eq!(glide.outcome(), Some(GlideOutcome::Cancelled));
    assert_eq!(state.offset_x(), -80.0);

    state.set_expand_state(ExpandState::ExpandedRight);
    assert_eq!(state.offset_x(), -80.0);
}

#[test]
fn events_follow_offset_then_state_order() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    let events = record_events(&state);

    state.drag_by(60.0);
    state.on_drag_end(snap());
    state.frame_clock().drain_frame_callbacks(0);

    assert_eq!(
        *events.borrow(),
        vec![
            ScaffoldEvent::OffsetChanged { offset_x: 60.0 },
            ScaffoldEvent::TargetStateChanged {
                previous: ExpandState::Collapsed,
                current: ExpandState::ExpandedLeft,
            },
            ScaffoldEvent::OffsetChanged { offset_x: 100.0 },
            ScaffoldEvent::CurrentStateChanged {
                previous: ExpandState::Collapsed,
                current: ExpandState::ExpandedLeft,
            },
            ScaffoldEvent::GlideFinished {
                state: ExpandState::ExpandedLeft
            },
        ]
    );
}

#[test]
fn listener_may_read_state_during_notification() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let reader = state.clone();
    let sink = Rc::clone(&seen);
    let id = state.add_listener(move |_| sink.borrow_mut().push(reader.offset_x()));

    state.drag_by(25.0);
    assert_eq!(*seen.borrow(), vec![25.0]);

    assert!(state.remove_listener(id));
    assert!(!state.remove_listener(id));
    assert_eq!(state.listener_count(), 0);
    state.drag_by(5.0);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn dropping_state_cancels_glide() {
    let clock = FrameClock::new();
    let state =
        DraggableScaffoldState::with_frame_clock(DraggableScaffoldConfig::default(), clock.clone());
    state.on_left_panel_measured(100.0);

    let glide = state.animate_to_state(ExpandState::ExpandedLeft, tween(300));
    assert!(clock.has_frame_callbacks());

    drop(state);
    assert_eq!(glide.outcome(), Some(GlideOutcome::Cancelled));
    assert!(!clock.has_frame_callbacks());
}

#[test]
fn dropping_glide_handle_keeps_animating() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    drop(state.animate_to_state(ExpandState::ExpandedLeft, tween(200)));

    assert!(state.is_animating());
    run_frames(&state.frame_clock(), 0);
    assert_eq!(state.current_state(), ExpandState::ExpandedLeft);
}

#[test]
fn non_finite_drag_is_ignored() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    assert_eq!(state.drag_by(f32::NAN), 0.0);
    assert_eq!(state.drag_by(f32::INFINITY), 0.0);
    assert_eq!(state.offset_x(), 0.0);
}

#[test]
fn shrinking_panel_pulls_offset_into_bounds() {
    let state = state_with(DraggableScaffoldConfig::default(), 200.0, 0.0, 320.0);
    state.set_expand_state(ExpandState::ExpandedLeft);
    let events = record_events(&state);

    state.on_left_panel_measured(100.0);

    assert_eq!(state.offset_x(), 100.0);
    assert_eq!(state.upper_bound(), 100.0);
    assert_eq!(state.current_state(), ExpandState::ExpandedLeft);
    assert_eq!(
        events.borrow().first(),
        Some(&ScaffoldEvent::OffsetChanged { offset_x: 100.0 })
    );
}

#[test]
fn removing_panel_returns_offset_to_origin() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 80.0, 320.0);
    state.drag_by(-60.0);

    state.on_right_panel_measured(0.0);
    assert_eq!(state.offset_x(), 0.0);
    assert_eq!(state.lower_bound(), 0.0);
}

#[test]
fn glide_follows_panel_remeasured_mid_flight() {
    let state = state_with(DraggableScaffoldConfig::default(), 200.0, 0.0, 320.0);
    let glide = state.animate_to_state(ExpandState::ExpandedLeft, tween(300));
    let clock = state.frame_clock();
    clock.drain_frame_callbacks(0);
    clock.drain_frame_callbacks(FRAME_INTERVAL_60HZ_NANOS);

    state.on_left_panel_measured(100.0);
    assert!(state.is_animating());
    run_frames(&clock, FRAME_INTERVAL_60HZ_NANOS * 2);

    assert_eq!(glide.outcome(), Some(GlideOutcome::Finished(ExpandState::ExpandedLeft)));
    assert_eq!(state.offset_x(), 100.0);
    assert_eq!(state.current_state(), ExpandState::ExpandedLeft);
}

#[test]
fn shrinking_foreground_clamps_full_width_offset() {
    let config = DraggableScaffoldConfig::default().with_allow_full_width_swipe(true);
    let state = state_with(config, 100.0, 80.0, 320.0);
    state.drag_by(-300.0);

    state.on_foreground_measured(200.0);
    assert_eq!(state.offset_x(), -200.0);
    assert_eq!(state.lower_bound(), -200.0);
    assert_eq!(state.current_state(), ExpandState::ExpandedFullRight);
}

#[test]
fn full_width_bound_never_drops_below_panel() {
    let config = DraggableScaffoldConfig::default().with_allow_full_width_swipe(true);
    let state = state_with(config, 100.0, 0.0, 0.0);

    assert_eq!((state.lower_bound(), state.upper_bound()), (0.0, 100.0));
    state.drag_by(150.0);
    assert_eq!(state.offset_x(), 100.0);
}

#[test]
fn full_width_glide_follows_foreground_resize() {
    let config = DraggableScaffoldConfig::default().with_allow_full_width_swipe(true);
    let state = state_with(config, 0.0, 80.0, 320.0);
    let glide = state.animate_to_state(ExpandState::ExpandedFullRight, tween(300));
    let clock = state.frame_clock();
    clock.drain_frame_callbacks(0);
    clock.drain_frame_callbacks(FRAME_INTERVAL_60HZ_NANOS);

    state.on_foreground_measured(200.0);
    run_frames(&clock, FRAME_INTERVAL_60HZ_NANOS * 2);

    assert_eq!(
        glide.outcome(),
        Some(GlideOutcome::Finished(ExpandState::ExpandedFullRight))
    );
    assert_eq!(state.offset_x(), -200.0);
    assert_eq!(state.current_state(), ExpandState::ExpandedFullRight);
}

#[test]
fn spring_overshoot_stays_inside_bounds() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    let upper = state.upper_bound();
    let max_seen = Rc::new(RefCell::new(f32::MIN));
    let sink = Rc::clone(&max_seen);
    state.add_listener(move |event| {
        if let ScaffoldEvent::OffsetChanged { offset_x } = event {
            let mut peak = sink.borrow_mut();
            *peak = peak.max(*offset_x);
        }
    });

    state.animate_to_state(ExpandState::ExpandedLeft, spring(0.2, 1500.0));
    run_frames(&state.frame_clock(), 0);

    assert!(*max_seen.borrow() <= upper);
    assert_eq!(state.offset_x(), 100.0);
}

#[test]
fn malformed_spring_does_not_corrupt_offset() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    let glide = state.animate_to_state(ExpandState::ExpandedLeft, spring(1.0, -10.0));
    run_frames(&state.frame_clock(), 0);

    assert_eq!(glide.outcome(), Some(GlideOutcome::Finished(ExpandState::ExpandedLeft)));
    assert_eq!(state.offset_x(), 100.0);
    state.drag_by(-30.0);
    assert_eq!(state.offset_x(), 70.0);
}

#[test]
fn full_width_state_without_full_swipe_rests_at_bound() {
    let state = state_with(DraggableScaffoldConfig::default(), 100.0, 0.0, 320.0);
    state.set_expand_state(ExpandState::ExpandedFullLeft);
    assert_eq!(state.offset_x(), 100.0);
    assert_eq!(state.offset_for(ExpandState::ExpandedFullLeft), 320.0);
}
