/// Multiplier applied to raw drag deltas. The higher the value the easier it
/// is to drag.
#[derive(Debug, Clone, Copy)]
pub struct DragResistance(f32);

impl DragResistance {
    pub const ZERO: DragResistance = DragResistance(0.0);
    pub const STRONG: DragResistance = DragResistance(0.5);
    pub const MEDIUM: DragResistance = DragResistance(0.7);
    pub const NORMAL: DragResistance = DragResistance(1.0);
    pub const WEAK: DragResistance = DragResistance(2.0);

    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// The multiplier, never negative.
    pub fn value(self) -> f32 {
        if self.0.is_finite() {
            self.0.max(0.0)
        } else {
            0.0
        }
    }

    pub fn apply(self, delta: f32) -> f32 {
        delta * self.value()
    }
}

impl PartialEq for DragResistance {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Default for DragResistance {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<f32> for DragResistance {
    fn from(value: f32) -> Self {
        Self(value)
    }
}
