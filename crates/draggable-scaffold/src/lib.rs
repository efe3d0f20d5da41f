//! A foreground panel layered over optional left and right panels, dragged
//! horizontally to reveal them and snapped to discrete rest states on release.
//!
//! The crate holds no rendering code. A host feeds it measured widths, drag
//! deltas and frame timestamps, and renders from the offset, progress values
//! and states it reports.
//!
//! ```
//! use draggable_scaffold::{
//!     AnimationType, DraggableScaffoldConfig, DraggableScaffoldState, ExpandState,
//! };
//!
//! let state = DraggableScaffoldState::new(DraggableScaffoldConfig::default());
//! state.on_foreground_measured(320.0);
//! state.on_left_panel_measured(100.0);
//!
//! state.drag_by(70.0);
//! assert_eq!(state.target_state(), ExpandState::ExpandedLeft);
//!
//! let glide = state.on_drag_end(AnimationType::default());
//! let clock = state.frame_clock();
//! let mut now = 0;
//! while clock.has_frame_callbacks() {
//!     clock.drain_frame_callbacks(now);
//!     now += 16_666_667;
//! }
//! assert!(glide.is_complete());
//! assert_eq!(state.current_state(), ExpandState::ExpandedLeft);
//! ```

mod config;
mod drag_resistance;
mod event;
mod expand_state;
mod glide;
mod saver;
mod scaffold;
mod snap_offset;
mod state;

pub use config::DraggableScaffoldConfig;
pub use drag_resistance::DragResistance;
pub use event::{ListenerId, ScaffoldEvent};
pub use expand_state::ExpandState;
pub use glide::{Glide, GlideOutcome};
pub use saver::{ScaffoldSnapshot, SnapshotError, SNAPSHOT_VERSION};
pub use scaffold::DraggableScaffold;
pub use snap_offset::SnapOffset;
pub use state::DraggableScaffoldState;

pub use draggable_animation::{
    snap, spring, tween, AnimationSpec, AnimationType, Easing, SpringSpec,
};
pub use draggable_core::{FrameClock, TaskQueue};
