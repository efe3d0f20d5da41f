//! Scripted walkthrough of the scaffold configurations a host would typically
//! show: a button-driven toggle, per-side resistance presets, offset-driven
//! styling and a full-width swipe with haptic feedback.

use std::cell::Cell;
use std::rc::Rc;

use draggable_core::FRAME_INTERVAL_60HZ_NANOS;
use draggable_scaffold::{
    tween, DragResistance, DraggableScaffold, DraggableScaffoldConfig, DraggableScaffoldState,
    ExpandState, FrameClock, ScaffoldEvent, TaskQueue,
};

const FOREGROUND_WIDTH: f32 = 360.0;
const PANEL_WIDTH: f32 = 96.0;

/// Host stand-in that owns the frame loop shared by every demo.
struct Host {
    clock: FrameClock,
    tasks: TaskQueue,
    now_nanos: Cell<u64>,
}

impl Host {
    fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            tasks: TaskQueue::new(),
            now_nanos: Cell::new(0),
        }
    }

    fn scaffold(&self, config: DraggableScaffoldConfig) -> DraggableScaffold {
        DraggableScaffold::new(DraggableScaffoldState::with_frame_clock(
            config,
            self.clock.clone(),
        ))
    }

    /// Runs frames until no glide or task is left.
    fn settle(&self) -> usize {
        let mut frames = 0;
        self.tasks.run_until_stalled();
        while self.clock.has_frame_callbacks() || self.tasks.has_pending_tasks() {
            self.clock.drain_frame_callbacks(self.now_nanos.get());
            self.tasks.run_until_stalled();
            self.now_nanos.set(self.now_nanos.get() + FRAME_INTERVAL_60HZ_NANOS);
            frames += 1;
            if frames > 10_000 {
                log::warn!("frame loop did not settle");
                break;
            }
        }
        frames
    }

    /// Feeds `total` pixels of drag split over `steps` gesture frames.
    fn swipe(&self, scaffold: &DraggableScaffold, total: f32, steps: usize) {
        let step = total / steps as f32;
        for _ in 0..steps {
            scaffold.on_horizontal_drag(step);
        }
        scaffold.on_drag_end();
        let frames = self.settle();
        log::debug!("release settled after {frames} frames");
    }
}

fn report(label: &str, scaffold: &DraggableScaffold) {
    let state = scaffold.state();
    println!(
        "  {label:<28} offset {:>7.1}  state {:<20} left {:.2}  right {:.2}",
        state.offset_x(),
        state.current_state().to_string(),
        scaffold.left_panel_alpha(),
        scaffold.right_panel_alpha(),
    );
}

fn toggle_demo(host: &Host) {
    println!("Toggle with drag disabled");
    let scaffold =
        host.scaffold(DraggableScaffoldConfig::default().with_drag_gesture_enabled(false));
    scaffold.on_layout(PANEL_WIDTH, PANEL_WIDTH, FOREGROUND_WIDTH);

    scaffold.on_horizontal_drag(80.0);
    report("after ignored drag", &scaffold);

    for _ in 0..2 {
        let state = scaffold.state().clone();
        host.tasks.spawn(async move {
            let outcome = if state.current_state() == ExpandState::Collapsed {
                state
                    .animate_to_state(ExpandState::ExpandedLeft, tween(1000))
                    .await
            } else {
                state
                    .animate_to_state(ExpandState::Collapsed, Default::default())
                    .await
            };
            log::info!("toggle finished: {outcome:?}");
        });
        let frames = host.settle();
        report(&format!("toggled ({frames} frames)"), &scaffold);
    }
}

fn resistance_demo(host: &Host) {
    for (label, default_state, resistance) in [
        (
            "Default right, strong resistance",
            ExpandState::ExpandedRight,
            DragResistance::STRONG,
        ),
        (
            "Default left, weak resistance",
            ExpandState::ExpandedLeft,
            DragResistance::WEAK,
        ),
    ] {
        println!("{label}");
        let scaffold = host.scaffold(
            DraggableScaffoldConfig::default()
                .with_default_expand_state(default_state)
                .with_drag_resistance(resistance),
        );
        scaffold.on_layout(PANEL_WIDTH, PANEL_WIDTH, FOREGROUND_WIDTH);
        report("initial", &scaffold);

        let toward_collapsed = if default_state == ExpandState::ExpandedRight {
            60.0
        } else {
            -60.0
        };
        host.swipe(&scaffold, toward_collapsed, 6);
        report("after 60px swipe back", &scaffold);
    }
}

/// Blends two RGB colors by `fraction`.
fn blend(from: [u8; 3], to: [u8; 3], fraction: f32) -> [u8; 3] {
    let mut out = [0; 3];
    for (channel, (a, b)) in out.iter_mut().zip(from.iter().zip(to.iter())) {
        *channel = (f32::from(*a) + (f32::from(*b) - f32::from(*a)) * fraction).round() as u8;
    }
    out
}

fn offset_to_elevation(progress: f32) -> f32 {
    (progress.clamp(0.0, 1.0) * 16.0).max(4.0)
}

fn styling_demo(host: &Host) {
    println!("Both sides, offset-driven color and elevation");
    let scaffold = host.scaffold(DraggableScaffoldConfig::default());
    scaffold.on_layout(PANEL_WIDTH, PANEL_WIDTH, FOREGROUND_WIDTH);
    let surface = [255, 255, 255];

    for delta in [30.0, 30.0, -90.0, -30.0] {
        scaffold.on_horizontal_drag(delta);
        let color = if scaffold.left_panel_alpha() > 0.0 {
            blend(surface, [255, 0, 255], scaffold.left_panel_alpha())
        } else {
            blend(surface, [0, 255, 255], scaffold.right_panel_alpha())
        };
        println!(
            "  translation {:>4}px  card #{:02x}{:02x}{:02x}  elevation {:.1}dp",
            scaffold.foreground_translation(),
            color[0],
            color[1],
            color[2],
            offset_to_elevation(scaffold.right_panel_alpha()),
        );
    }
    scaffold.on_drag_end();
    host.settle();
    report("released", &scaffold);
}

fn full_width_demo(host: &Host) {
    println!("Full-width swipe at 0.3");
    let scaffold = host.scaffold(
        DraggableScaffoldConfig::default()
            .with_allow_full_width_swipe(true)
            .with_full_width_swipe_offset(0.3),
    );
    scaffold.on_layout(0.0, PANEL_WIDTH, FOREGROUND_WIDTH);

    let haptics = Rc::new(Cell::new(0));
    let haptic_count = Rc::clone(&haptics);
    scaffold.state().add_listener(move |event| match event {
        ScaffoldEvent::TargetStateChanged { current, .. } if current.is_full_width() => {
            haptic_count.set(haptic_count.get() + 1);
            log::info!("haptic: long press ({current})");
        }
        ScaffoldEvent::CurrentStateChanged { current, .. } => {
            log::info!("card visible: {}", !current.is_full_width());
        }
        _ => {}
    });

    host.swipe(&scaffold, -150.0, 10);
    report("after full swipe", &scaffold);

    let state = scaffold.state().clone();
    host.tasks.spawn(async move {
        state
            .animate_to_state(ExpandState::Collapsed, Default::default())
            .await;
    });
    host.settle();
    report("after reset", &scaffold);
    println!("  haptic feedback fired {} time(s)", haptics.get());
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Draggable Scaffold Demo ===");
    let host = Host::new();
    toggle_demo(&host);
    resistance_demo(&host);
    styling_demo(&host);
    full_width_demo(&host);
}
