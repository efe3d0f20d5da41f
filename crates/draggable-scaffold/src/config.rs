use crate::{DragResistance, ExpandState, SnapOffset};

/// Construction-time options of a [`DraggableScaffoldState`](crate::DraggableScaffoldState).
///
/// ```
/// use draggable_scaffold::{DraggableScaffoldConfig, DragResistance, ExpandState};
///
/// let config = DraggableScaffoldConfig::default()
///     .with_default_expand_state(ExpandState::ExpandedRight)
///     .with_drag_resistance(DragResistance::STRONG);
/// assert_eq!(config.default_expand_state, ExpandState::ExpandedRight);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraggableScaffoldConfig {
    /// State applied at start and again whenever a panel width changes.
    pub default_expand_state: ExpandState,
    pub snap_offset: SnapOffset,
    /// Threshold on full-width progress; only used with `allow_full_width_swipe`.
    pub full_width_swipe_offset: SnapOffset,
    pub allow_full_width_swipe: bool,
    pub drag_resistance: DragResistance,
    /// When false, manual drags are ignored. Programmatic transitions still run.
    pub drag_gesture_enabled: bool,
}

impl Default for DraggableScaffoldConfig {
    fn default() -> Self {
        Self {
            default_expand_state: ExpandState::Collapsed,
            snap_offset: SnapOffset::default(),
            full_width_swipe_offset: SnapOffset::default(),
            allow_full_width_swipe: false,
            drag_resistance: DragResistance::NORMAL,
            drag_gesture_enabled: true,
        }
    }
}

impl DraggableScaffoldConfig {
    pub fn with_default_expand_state(mut self, state: ExpandState) -> Self {
        self.default_expand_state = state;
        self
    }

    pub fn with_snap_offset(mut self, offset: impl Into<SnapOffset>) -> Self {
        self.snap_offset = offset.into();
        self
    }

    pub fn with_full_width_swipe_offset(mut self, offset: impl Into<SnapOffset>) -> Self {
        self.full_width_swipe_offset = offset.into();
        self
    }

    pub fn with_allow_full_width_swipe(mut self, allow: bool) -> Self {
        self.allow_full_width_swipe = allow;
        self
    }

    pub fn with_drag_resistance(mut self, resistance: impl Into<DragResistance>) -> Self {
        self.drag_resistance = resistance.into();
        self
    }

    pub fn with_drag_gesture_enabled(mut self, enabled: bool) -> Self {
        self.drag_gesture_enabled = enabled;
        self
    }

    /// Resistance actually applied to manual drags.
    pub fn effective_drag_resistance(&self) -> DragResistance {
        if self.drag_gesture_enabled {
            self.drag_resistance
        } else {
            DragResistance::ZERO
        }
    }
}
