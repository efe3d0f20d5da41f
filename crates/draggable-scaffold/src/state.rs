//! Drag/offset state machine behind the draggable scaffold.
//!
//! `DraggableScaffoldState` tracks the signed horizontal offset of the
//! foreground layer, the measured widths of the panels underneath, and the
//! single in-flight glide. Everything the host renders is derived from those
//! fields on demand:
//!
//! - progress ratios (`left_progress`, `right_progress`, full-width variants)
//!   drive opacity, color or elevation interpolation,
//! - `current_state` classifies the offset against the canonical rest offsets,
//! - `target_state` is the state a release would snap to right now.
//!
//! Mutations notify listeners registered with
//! [`DraggableScaffoldState::add_listener`] once the internal borrow has been
//! released, so a listener may call straight back into the state.

use std::cell::RefCell;
use std::rc::Rc;

use draggable_animation::{AnimationType, FloatAnimation};
use draggable_core::{FrameCallbackRegistration, FrameClock};
use smallvec::SmallVec;

use crate::event::{EventBatch, Listeners};
use crate::glide::GlideCompleter;
use crate::{
    DragResistance, DraggableScaffoldConfig, ExpandState, Glide, GlideOutcome, ListenerId,
    ScaffoldEvent,
};

/// Shared handle to the state of one draggable scaffold.
///
/// Cloning is cheap and every clone observes the same offset. The handle is
/// bound to the UI thread (`!Send`).
#[derive(Clone)]
pub struct DraggableScaffoldState {
    shared: Rc<Shared>,
}

struct Shared {
    inner: RefCell<ScaffoldInner>,
    listeners: RefCell<Listeners>,
    clock: FrameClock,
}

pub(crate) struct ScaffoldInner {
    pub(crate) config: DraggableScaffoldConfig,
    pub(crate) offset_x: f32,
    left_panel_width: f32,
    right_panel_width: f32,
    foreground_width: f32,
    glide: Option<ActiveGlide>,
    /// Bumped for every glide; frames from older glides are ignored.
    generation: u64,
    /// Re-applied instead of the default state until the user interacts.
    pub(crate) restored_state: Option<ExpandState>,
}

struct ActiveGlide {
    generation: u64,
    target_state: ExpandState,
    animation: FloatAnimation,
    completer: Option<GlideCompleter>,
    registration: Option<FrameCallbackRegistration>,
}

impl Drop for ActiveGlide {
    fn drop(&mut self) {
        if let Some(completer) = self.completer.take() {
            completer.complete(GlideOutcome::Cancelled);
        }
    }
}

/// Side effects collected while the inner state is borrowed.
#[derive(Default)]
struct Effects {
    trailing: EventBatch,
    completions: SmallVec<[(GlideCompleter, GlideOutcome); 2]>,
}

/// Values compared before and after a mutation to derive events.
#[derive(Clone, Copy)]
struct Observation {
    offset_x: f32,
    current: ExpandState,
    target: ExpandState,
}

impl Observation {
    fn of(inner: &ScaffoldInner) -> Self {
        Self {
            offset_x: inner.offset_x,
            current: inner.current_state(),
            target: inner.target_state(),
        }
    }

    fn diff(self, after: Observation, events: &mut EventBatch) {
        if self.offset_x != after.offset_x {
            events.push(ScaffoldEvent::OffsetChanged {
                offset_x: after.offset_x,
            });
        }
        if self.current != after.current {
            events.push(ScaffoldEvent::CurrentStateChanged {
                previous: self.current,
                current: after.current,
            });
        }
        if self.target != after.target {
            events.push(ScaffoldEvent::TargetStateChanged {
                previous: self.target,
                current: after.target,
            });
        }
    }
}

fn sanitize_width(width: f32) -> f32 {
    if width.is_finite() {
        width.max(0.0)
    } else {
        0.0
    }
}

fn ratio(offset: f32, extent: f32) -> f32 {
    if extent == 0.0 {
        0.0
    } else {
        offset / extent
    }
}

impl ScaffoldInner {
    pub(crate) fn new(config: DraggableScaffoldConfig, offset_x: f32) -> Self {
        Self {
            config,
            offset_x: if offset_x.is_finite() { offset_x } else { 0.0 },
            left_panel_width: 0.0,
            right_panel_width: 0.0,
            foreground_width: 0.0,
            glide: None,
            generation: 0,
            restored_state: None,
        }
    }

    fn left_progress(&self) -> f32 {
        ratio(self.offset_x, self.left_panel_width)
    }

    fn right_progress(&self) -> f32 {
        ratio(self.offset_x, -self.right_panel_width)
    }

    fn left_full_progress(&self) -> f32 {
        ratio(self.offset_x, self.foreground_width)
    }

    fn right_full_progress(&self) -> f32 {
        ratio(self.offset_x, -self.foreground_width)
    }

    fn offset_for(&self, state: ExpandState) -> f32 {
        match state {
            ExpandState::Collapsed => 0.0,
            ExpandState::ExpandedLeft => self.left_panel_width,
            ExpandState::ExpandedRight => -self.right_panel_width,
            ExpandState::ExpandedFullRight if self.right_panel_width != 0.0 => {
                -self.foreground_width
            }
            ExpandState::ExpandedFullLeft if self.left_panel_width != 0.0 => {
                self.foreground_width
            }
            // Full swipe toward a side without a panel underneath.
            ExpandState::ExpandedFullRight | ExpandState::ExpandedFullLeft => 0.0,
        }
    }

    /// A side without a panel cannot be dragged toward. With full-width
    /// swipes a side reaches the foreground width, but never less than its
    /// panel.
    fn bounds(&self) -> (f32, f32) {
        let reach = |panel: f32| {
            if panel == 0.0 {
                0.0
            } else if self.config.allow_full_width_swipe {
                self.foreground_width.max(panel)
            } else {
                panel
            }
        };
        (-reach(self.right_panel_width), reach(self.left_panel_width))
    }

    /// Where a transition to `state` comes to rest: its canonical offset,
    /// clamped into the bounds.
    fn resting_offset(&self, state: ExpandState) -> f32 {
        let (lower, upper) = self.bounds();
        self.offset_for(state).clamp(lower, upper)
    }

    pub(crate) fn current_state(&self) -> ExpandState {
        let offset = self.offset_x;
        if self.left_panel_width != 0.0 && offset == self.left_panel_width {
            ExpandState::ExpandedLeft
        } else if self.right_panel_width != 0.0 && offset == -self.right_panel_width {
            ExpandState::ExpandedRight
        } else if self.right_panel_width != 0.0
            && self.foreground_width != 0.0
            && offset == -self.foreground_width
        {
            ExpandState::ExpandedFullRight
        } else if self.left_panel_width != 0.0
            && self.foreground_width != 0.0
            && offset == self.foreground_width
        {
            ExpandState::ExpandedFullLeft
        } else {
            ExpandState::Collapsed
        }
    }

    /// First matching rule wins; full-width thresholds come first so a
    /// committed swipe is not read as a partial reveal.
    fn target_state(&self) -> ExpandState {
        let config = &self.config;
        if config.allow_full_width_swipe
            && config
                .full_width_swipe_offset
                .is_exceeded_by(self.left_full_progress())
        {
            ExpandState::ExpandedFullLeft
        } else if config.allow_full_width_swipe
            && config
                .full_width_swipe_offset
                .is_exceeded_by(self.right_full_progress())
        {
            ExpandState::ExpandedFullRight
        } else if config.snap_offset.is_exceeded_by(self.left_progress()) {
            ExpandState::ExpandedLeft
        } else if config.snap_offset.is_exceeded_by(self.right_progress()) {
            ExpandState::ExpandedRight
        } else {
            ExpandState::Collapsed
        }
    }

    fn cancel_glide(&mut self, effects: &mut Effects) {
        if let Some(mut glide) = self.glide.take() {
            drop(glide.registration.take());
            log::debug!(
                "glide #{} toward {} cancelled at offset {}",
                glide.generation,
                glide.target_state,
                self.offset_x
            );
            if let Some(completer) = glide.completer.take() {
                effects
                    .completions
                    .push((completer, GlideOutcome::Cancelled));
            }
            effects.trailing.push(ScaffoldEvent::GlideCancelled {
                state: glide.target_state,
            });
        }
    }

    /// Moves to `state` instantly when the offset does not already classify
    /// as `state`.
    fn jump_to(&mut self, state: ExpandState, effects: &mut Effects) {
        if state != self.current_state() {
            self.cancel_glide(effects);
            self.offset_x = self.resting_offset(state);
        }
    }

    /// Pulls the offset back into the bounds and points a glide in flight at
    /// its state's offset for the current widths.
    fn fit_to_geometry(&mut self) {
        let (lower, upper) = self.bounds();
        self.offset_x = self.offset_x.clamp(lower, upper);
        let Some(state) = self.glide.as_ref().map(|glide| glide.target_state) else {
            return;
        };
        let target = self.resting_offset(state);
        let offset_x = self.offset_x;
        if let Some(glide) = self.glide.as_mut() {
            if glide.animation.target() != target {
                log::debug!(
                    "glide #{} toward {state} retargeted: {} -> {target}",
                    glide.generation,
                    glide.animation.target()
                );
                glide.animation.retarget(offset_x, target);
            }
        }
    }

    fn reapply_resting_state(&mut self, effects: &mut Effects) {
        let state = self
            .restored_state
            .unwrap_or(self.config.default_expand_state);
        self.jump_to(state, effects);
    }
}

impl DraggableScaffoldState {
    pub fn new(config: DraggableScaffoldConfig) -> Self {
        Self::with_frame_clock(config, FrameClock::new())
    }

    /// Creates a state whose glides run on the host's `clock`.
    pub fn with_frame_clock(config: DraggableScaffoldConfig, clock: FrameClock) -> Self {
        Self::from_inner(ScaffoldInner::new(config, 0.0), clock)
    }

    pub(crate) fn from_inner(inner: ScaffoldInner, clock: FrameClock) -> Self {
        Self {
            shared: Rc::new(Shared {
                inner: RefCell::new(inner),
                listeners: RefCell::new(Listeners::default()),
                clock,
            }),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.shared.clock.clone()
    }

    pub fn config(&self) -> DraggableScaffoldConfig {
        self.shared.inner.borrow().config
    }

    /// Signed offset of the foreground layer. Positive reveals the left panel.
    pub fn offset_x(&self) -> f32 {
        self.shared.inner.borrow().offset_x
    }

    pub fn left_panel_width(&self) -> f32 {
        self.shared.inner.borrow().left_panel_width
    }

    pub fn right_panel_width(&self) -> f32 {
        self.shared.inner.borrow().right_panel_width
    }

    pub fn foreground_width(&self) -> f32 {
        self.shared.inner.borrow().foreground_width
    }

    /// Offset relative to the left panel's width; 0 while it is unmeasured.
    pub fn left_progress(&self) -> f32 {
        self.shared.inner.borrow().left_progress()
    }

    /// Offset relative to the right panel's width; 0 while it is unmeasured.
    pub fn right_progress(&self) -> f32 {
        self.shared.inner.borrow().right_progress()
    }

    pub fn left_full_progress(&self) -> f32 {
        self.shared.inner.borrow().left_full_progress()
    }

    pub fn right_full_progress(&self) -> f32 {
        self.shared.inner.borrow().right_full_progress()
    }

    /// Exact classification of the offset. Anything between rest positions
    /// reads as [`ExpandState::Collapsed`].
    pub fn current_state(&self) -> ExpandState {
        self.shared.inner.borrow().current_state()
    }

    /// The state a release at the current offset would snap to.
    pub fn target_state(&self) -> ExpandState {
        self.shared.inner.borrow().target_state()
    }

    /// Canonical offset of `state` for the current measurements.
    pub fn offset_for(&self, state: ExpandState) -> f32 {
        self.shared.inner.borrow().offset_for(state)
    }

    pub fn lower_bound(&self) -> f32 {
        self.shared.inner.borrow().bounds().0
    }

    pub fn upper_bound(&self) -> f32 {
        self.shared.inner.borrow().bounds().1
    }

    pub fn is_animating(&self) -> bool {
        self.shared.inner.borrow().glide.is_some()
    }

    pub fn on_left_panel_measured(&self, width: f32) {
        let width = sanitize_width(width);
        self.mutate(|inner, effects| {
            if inner.left_panel_width != width {
                log::debug!("left panel measured: {} -> {width}", inner.left_panel_width);
                inner.left_panel_width = width;
                inner.reapply_resting_state(effects);
                inner.fit_to_geometry();
            }
        });
    }

    pub fn on_right_panel_measured(&self, width: f32) {
        let width = sanitize_width(width);
        self.mutate(|inner, effects| {
            if inner.right_panel_width != width {
                log::debug!(
                    "right panel measured: {} -> {width}",
                    inner.right_panel_width
                );
                inner.right_panel_width = width;
                inner.reapply_resting_state(effects);
                inner.fit_to_geometry();
            }
        });
    }

    /// Stores the foreground width used by full-width swipes. The default
    /// state is not re-applied; the offset only moves to stay inside the
    /// bounds, or to a restored state that is still pending.
    pub fn on_foreground_measured(&self, width: f32) {
        let width = sanitize_width(width);
        self.mutate(|inner, effects| {
            if inner.foreground_width != width {
                log::debug!("foreground measured: {} -> {width}", inner.foreground_width);
                inner.foreground_width = width;
                if inner.restored_state.is_some() {
                    inner.reapply_resting_state(effects);
                }
                inner.fit_to_geometry();
            }
        });
    }

    /// Applies one frame of horizontal drag scaled by `resistance`, clamped to
    /// the reachable bounds. Returns the offset change actually applied.
    ///
    /// Ignored entirely when drag gestures are disabled.
    pub fn on_drag(&self, delta: f32, resistance: DragResistance) -> f32 {
        if !delta.is_finite() {
            return 0.0;
        }
        self.mutate(|inner, effects| {
            if !inner.config.drag_gesture_enabled {
                return 0.0;
            }
            inner.cancel_glide(effects);
            inner.restored_state = None;
            let (lower, upper) = inner.bounds();
            let previous = inner.offset_x;
            inner.offset_x = (previous + resistance.apply(delta)).clamp(lower, upper);
            log::trace!("drag {delta} -> offset {}", inner.offset_x);
            inner.offset_x - previous
        })
    }

    /// [`on_drag`](Self::on_drag) with the configured resistance.
    pub fn drag_by(&self, delta: f32) -> f32 {
        let resistance = self.shared.inner.borrow().config.effective_drag_resistance();
        self.on_drag(delta, resistance)
    }

    /// Glides to the state the current offset snaps to.
    pub fn on_drag_end(&self, animation: AnimationType) -> Glide {
        let target = self.target_state();
        log::debug!("drag released at {}; snapping to {target}", self.offset_x());
        self.animate_to_state(target, animation)
    }

    /// Glides to `state`, superseding any glide in flight.
    pub fn animate_to_state(&self, state: ExpandState, animation: AnimationType) -> Glide {
        let (glide, completer) = Glide::pending(state);
        self.mutate(move |inner, effects| {
            inner.cancel_glide(effects);
            inner.restored_state = None;
            inner.generation += 1;
            let target = inner.resting_offset(state);
            if inner.offset_x == target {
                effects
                    .completions
                    .push((completer, GlideOutcome::Finished(state)));
                effects
                    .trailing
                    .push(ScaffoldEvent::GlideFinished { state });
                return;
            }
            log::debug!(
                "glide #{} toward {state}: {} -> {target}",
                inner.generation,
                inner.offset_x
            );
            inner.glide = Some(ActiveGlide {
                generation: inner.generation,
                target_state: state,
                animation: FloatAnimation::new(inner.offset_x, target, animation),
                completer: Some(completer),
                registration: None,
            });
            self.schedule_frame(inner);
        });
        glide
    }

    /// Jumps to `state` without animating. No-op when already there.
    pub fn set_expand_state(&self, state: ExpandState) {
        self.mutate(|inner, effects| {
            inner.restored_state = None;
            inner.jump_to(state, effects);
        });
    }

    pub fn add_listener(&self, listener: impl Fn(&ScaffoldEvent) + 'static) -> ListenerId {
        self.shared.listeners.borrow_mut().add(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.shared.listeners.borrow_mut().remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }

    pub(crate) fn with_inner<R>(&self, f: impl FnOnce(&ScaffoldInner) -> R) -> R {
        f(&self.shared.inner.borrow())
    }

    fn schedule_frame(&self, inner: &mut ScaffoldInner) {
        let Some(glide) = inner.glide.as_mut() else {
            return;
        };
        let generation = glide.generation;
        let weak = Rc::downgrade(&self.shared);
        glide.registration = Some(self.shared.clock.with_frame_nanos(move |time| {
            if let Some(shared) = weak.upgrade() {
                DraggableScaffoldState { shared }.on_frame(generation, time);
            }
        }));
    }

    fn on_frame(&self, generation: u64, frame_time_nanos: u64) {
        self.mutate(|inner, effects| {
            let frame = match inner.glide.as_mut() {
                Some(glide) if glide.generation == generation => {
                    // Already popped from the clock's queue.
                    if let Some(registration) = glide.registration.take() {
                        registration.disarm();
                    }
                    glide.animation.sample(frame_time_nanos)
                }
                _ => return,
            };
            let (lower, upper) = inner.bounds();
            inner.offset_x = frame.value.clamp(lower, upper);
            if !frame.finished {
                self.schedule_frame(inner);
                return;
            }
            if let Some(mut glide) = inner.glide.take() {
                log::debug!(
                    "glide #{} settled at {} ({})",
                    glide.generation,
                    inner.offset_x,
                    glide.target_state
                );
                if let Some(completer) = glide.completer.take() {
                    effects
                        .completions
                        .push((completer, GlideOutcome::Finished(glide.target_state)));
                }
                effects.trailing.push(ScaffoldEvent::GlideFinished {
                    state: glide.target_state,
                });
            }
        });
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut ScaffoldInner, &mut Effects) -> R) -> R {
        let mut effects = Effects::default();
        let mut events = EventBatch::new();
        let result = {
            let mut inner = self.shared.inner.borrow_mut();
            let before = Observation::of(&inner);
            let result = f(&mut *inner, &mut effects);
            before.diff(Observation::of(&inner), &mut events);
            result
        };
        events.extend(effects.trailing);
        for (completer, outcome) in effects.completions {
            completer.complete(outcome);
        }
        self.emit(&events);
        result
    }

    fn emit(&self, events: &[ScaffoldEvent]) {
        if events.is_empty() {
            return;
        }
        let listeners = self.shared.listeners.borrow().snapshot();
        for event in events {
            for listener in &listeners {
                listener(event);
            }
        }
    }
}

impl std::fmt::Debug for DraggableScaffoldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.inner.borrow();
        f.debug_struct("DraggableScaffoldState")
            .field("offset_x", &inner.offset_x)
            .field("left_panel_width", &inner.left_panel_width)
            .field("right_panel_width", &inner.right_panel_width)
            .field("foreground_width", &inner.foreground_width)
            .field("current_state", &inner.current_state())
            .field("animating", &inner.glide.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
