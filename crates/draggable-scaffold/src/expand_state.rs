use serde::{Deserialize, Serialize};

/// Discrete rest positions of the foreground layer.
///
/// The declaration order is the positional snapshot encoding; append new
/// variants at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExpandState {
    /// Foreground centered, offset 0.
    #[default]
    Collapsed,
    /// Foreground pushed left by the right panel's width.
    ExpandedRight,
    /// Foreground pushed right by the left panel's width.
    ExpandedLeft,
    /// Foreground pushed left by its own width.
    ExpandedFullRight,
    /// Foreground pushed right by its own width.
    ExpandedFullLeft,
}

impl ExpandState {
    pub const ALL: [ExpandState; 5] = [
        ExpandState::Collapsed,
        ExpandState::ExpandedRight,
        ExpandState::ExpandedLeft,
        ExpandState::ExpandedFullRight,
        ExpandState::ExpandedFullLeft,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            ExpandState::Collapsed => 0,
            ExpandState::ExpandedRight => 1,
            ExpandState::ExpandedLeft => 2,
            ExpandState::ExpandedFullRight => 3,
            ExpandState::ExpandedFullLeft => 4,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    pub fn is_expanded(self) -> bool {
        self != ExpandState::Collapsed
    }

    pub fn is_full_width(self) -> bool {
        matches!(
            self,
            ExpandState::ExpandedFullRight | ExpandState::ExpandedFullLeft
        )
    }
}

impl std::fmt::Display for ExpandState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExpandState::Collapsed => "collapsed",
            ExpandState::ExpandedRight => "expanded-right",
            ExpandState::ExpandedLeft => "expanded-left",
            ExpandState::ExpandedFullRight => "expanded-full-right",
            ExpandState::ExpandedFullLeft => "expanded-full-left",
        };
        f.write_str(name)
    }
}
