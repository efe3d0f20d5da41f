//! Save/restore of a scaffold state across a host teardown.
//!
//! The persisted form is a versioned record with named fields. Decoding also
//! accepts the older positional list
//! `[offset_x, snap_offset, state_ordinal, allow_full_width_swipe]`.

use draggable_core::FrameClock;
use serde::{Deserialize, Serialize};

use crate::state::ScaffoldInner;
use crate::{DraggableScaffoldConfig, DraggableScaffoldState, ExpandState, SnapOffset};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug)]
pub enum SnapshotError {
    Malformed(String),
    UnsupportedVersion(u32),
    UnknownStateOrdinal(u8),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Malformed(reason) => write!(f, "malformed scaffold snapshot: {reason}"),
            SnapshotError::UnsupportedVersion(version) => {
                write!(f, "unsupported scaffold snapshot version {version}")
            }
            SnapshotError::UnknownStateOrdinal(ordinal) => {
                write!(f, "unknown expand state ordinal {ordinal}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Malformed(err.to_string())
    }
}

/// Minimal persisted form of a [`DraggableScaffoldState`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldSnapshot {
    pub version: u32,
    pub offset_x: f32,
    pub snap_offset: f32,
    pub default_expand_state: ExpandState,
    pub allow_full_width_swipe: bool,
    #[serde(default = "default_full_width_swipe_offset")]
    pub full_width_swipe_offset: f32,
    /// `current_state()` when the snapshot was taken.
    #[serde(default)]
    pub settled_state: ExpandState,
}

fn default_full_width_swipe_offset() -> f32 {
    SnapOffset::default().offset()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotRepr {
    Versioned(ScaffoldSnapshot),
    Positional((f32, f32, u8, bool)),
}

impl ScaffoldSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot = match serde_json::from_str::<SnapshotRepr>(json)? {
            SnapshotRepr::Versioned(snapshot) => snapshot,
            SnapshotRepr::Positional((offset_x, snap_offset, ordinal, allow_full_width_swipe)) => {
                Self::from_positional(offset_x, snap_offset, ordinal, allow_full_width_swipe)?
            }
        };
        snapshot.validate()
    }

    /// Decodes the legacy positional layout. The single stored state serves
    /// as both default and settled state.
    pub fn from_positional(
        offset_x: f32,
        snap_offset: f32,
        state_ordinal: u8,
        allow_full_width_swipe: bool,
    ) -> Result<Self, SnapshotError> {
        let state = ExpandState::from_ordinal(state_ordinal)
            .ok_or(SnapshotError::UnknownStateOrdinal(state_ordinal))?;
        Ok(Self {
            version: SNAPSHOT_VERSION,
            offset_x,
            snap_offset,
            default_expand_state: state,
            allow_full_width_swipe,
            full_width_swipe_offset: default_full_width_swipe_offset(),
            settled_state: state,
        })
    }

    fn validate(self) -> Result<Self, SnapshotError> {
        if self.version == 0 || self.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        if !self.offset_x.is_finite() {
            return Err(SnapshotError::Malformed(format!(
                "offset_x is not finite: {}",
                self.offset_x
            )));
        }
        Ok(self)
    }
}

impl DraggableScaffoldState {
    pub fn snapshot(&self) -> ScaffoldSnapshot {
        self.with_inner(|inner| ScaffoldSnapshot {
            version: SNAPSHOT_VERSION,
            offset_x: inner.offset_x,
            snap_offset: inner.config.snap_offset.offset(),
            default_expand_state: inner.config.default_expand_state,
            allow_full_width_swipe: inner.config.allow_full_width_swipe,
            full_width_swipe_offset: inner.config.full_width_swipe_offset.offset(),
            settled_state: inner.current_state(),
        })
    }

    /// Rebuilds a state from `snapshot` on top of the default configuration.
    pub fn restore(snapshot: &ScaffoldSnapshot) -> Self {
        Self::restore_with(snapshot, DraggableScaffoldConfig::default(), FrameClock::new())
    }

    /// Rebuilds a state from `snapshot`. Options the snapshot does not carry
    /// (resistance, gesture enablement) come from `base`.
    ///
    /// Panel widths start unmeasured. Until the first drag or programmatic
    /// transition, width changes re-apply the snapshot's settled state rather
    /// than the default state, so the restored offset survives remeasurement.
    pub fn restore_with(
        snapshot: &ScaffoldSnapshot,
        base: DraggableScaffoldConfig,
        clock: FrameClock,
    ) -> Self {
        let config = base
            .with_snap_offset(snapshot.snap_offset)
            .with_full_width_swipe_offset(snapshot.full_width_swipe_offset)
            .with_default_expand_state(snapshot.default_expand_state)
            .with_allow_full_width_swipe(snapshot.allow_full_width_swipe);
        let mut inner = ScaffoldInner::new(config, snapshot.offset_x);
        inner.restored_state = Some(snapshot.settled_state);
        log::debug!(
            "restored scaffold at offset {} (settled {}, default {})",
            snapshot.offset_x,
            snapshot.settled_state,
            snapshot.default_expand_state
        );
        Self::from_inner(inner, clock)
    }
}

#[cfg(test)]
#[path = "tests/saver_tests.rs"]
mod tests;
