//! Binding between a [`DraggableScaffoldState`] and a host surface.
//!
//! The host reports layout sizes and horizontal drag gestures here and reads
//! back the foreground translation and per-panel alpha.

use draggable_animation::AnimationType;

use crate::{DraggableScaffoldConfig, DraggableScaffoldState, Glide};

pub struct DraggableScaffold {
    state: DraggableScaffoldState,
    release_animation: AnimationType,
}

impl DraggableScaffold {
    pub fn new(state: DraggableScaffoldState) -> Self {
        Self {
            state,
            release_animation: AnimationType::default(),
        }
    }

    pub fn with_config(config: DraggableScaffoldConfig) -> Self {
        Self::new(DraggableScaffoldState::new(config))
    }

    /// Animation used to snap after a drag is released.
    pub fn with_release_animation(mut self, animation: AnimationType) -> Self {
        self.release_animation = animation;
        self
    }

    pub fn state(&self) -> &DraggableScaffoldState {
        &self.state
    }

    /// Forwards measured widths. Pass 0 for an absent panel.
    pub fn on_layout(&self, left_width: f32, right_width: f32, foreground_width: f32) {
        self.state.on_foreground_measured(foreground_width);
        self.state.on_left_panel_measured(left_width);
        self.state.on_right_panel_measured(right_width);
    }

    pub fn on_horizontal_drag(&self, delta: f32) -> f32 {
        self.state.drag_by(delta)
    }

    pub fn on_drag_end(&self) -> Glide {
        self.state.on_drag_end(self.release_animation)
    }

    /// Horizontal translation of the foreground in whole pixels.
    pub fn foreground_translation(&self) -> i32 {
        self.state.offset_x().round() as i32
    }

    pub fn left_panel_alpha(&self) -> f32 {
        self.state.left_progress().clamp(0.0, 1.0)
    }

    pub fn right_panel_alpha(&self) -> f32 {
        self.state.right_progress().clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "tests/scaffold_tests.rs"]
mod tests;
