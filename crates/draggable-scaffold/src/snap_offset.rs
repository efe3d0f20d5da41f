use std::cmp::Ordering;

/// Fraction of a panel's width after which a release snaps outward instead
/// of back to collapsed.
#[derive(Debug, Clone, Copy)]
pub struct SnapOffset(f32);

impl SnapOffset {
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// The threshold clamped into `[0, 1]`.
    pub fn offset(self) -> f32 {
        if self.0.is_finite() {
            self.0.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether `progress` lies strictly past this threshold.
    pub fn is_exceeded_by(self, progress: f32) -> bool {
        progress > self.offset()
    }
}

impl Default for SnapOffset {
    fn default() -> Self {
        Self(0.5)
    }
}

impl From<f32> for SnapOffset {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

impl PartialEq for SnapOffset {
    fn eq(&self, other: &Self) -> bool {
        self.offset() == other.offset()
    }
}

impl PartialEq<f32> for SnapOffset {
    fn eq(&self, other: &f32) -> bool {
        self.offset() == *other
    }
}

impl PartialOrd<f32> for SnapOffset {
    fn partial_cmp(&self, other: &f32) -> Option<Ordering> {
        self.offset().partial_cmp(other)
    }
}

impl PartialEq<SnapOffset> for f32 {
    fn eq(&self, other: &SnapOffset) -> bool {
        *self == other.offset()
    }
}

impl PartialOrd<SnapOffset> for f32 {
    fn partial_cmp(&self, other: &SnapOffset) -> Option<Ordering> {
        self.partial_cmp(&other.offset())
    }
}
