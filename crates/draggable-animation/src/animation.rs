//! Easing curves and animation specs.
//!
//! Names follow the Jetpack Compose animation vocabulary (`tween`, `spring`,
//! `FastOutSlowInEasing`) so call sites read like the Android widget they
//! replace.

/// Types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Easing curves applied to a tween's linear progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// No easing. Compose: `LinearEasing`.
    LinearEasing,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve. Compose: `FastOutSlowInEasing`.
    FastOutSlowInEasing,
    /// Compose: `LinearOutSlowInEasing`.
    LinearOutSlowInEasing,
    /// Compose: `FastOutLinearInEasing`.
    FastOutLinearInEasing,
    /// Arbitrary cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1).
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Maps a linear fraction in [0, 1] onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        let (x1, y1, x2, y2) = match *self {
            Easing::LinearEasing => return fraction.clamp(0.0, 1.0),
            Easing::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Easing::FastOutSlowInEasing => (0.4, 0.0, 0.2, 1.0),
            Easing::LinearOutSlowInEasing => (0.0, 0.0, 0.2, 1.0),
            Easing::FastOutLinearInEasing => (0.4, 0.0, 1.0, 1.0),
            Easing::CubicBezier { x1, y1, x2, y2 } => (x1, y1, x2, y2),
        };
        CubicCurve::new(x1, y1, x2, y2).solve(fraction)
    }
}

/// Polynomial coefficients of one axis of a unit cubic bezier.
#[derive(Clone, Copy)]
struct Axis {
    a: f32,
    b: f32,
    c: f32,
}

impl Axis {
    fn new(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self { a: 1.0 - c - b, b, c }
    }

    fn sample(self, t: f32) -> f32 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn derivative(self, t: f32) -> f32 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

struct CubicCurve {
    x: Axis,
    y: Axis,
}

impl CubicCurve {
    const EPSILON: f32 = 1e-6;

    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: Axis::new(x1, x2),
            y: Axis::new(y1, y2),
        }
    }

    fn solve(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        let t = self
            .newton(fraction)
            .unwrap_or_else(|| self.bisect(fraction));
        self.y.sample(t)
    }

    fn newton(&self, fraction: f32) -> Option<f32> {
        let mut t = fraction;
        for _ in 0..8 {
            let error = self.x.sample(t) - fraction;
            if error.abs() < Self::EPSILON {
                return Some(t);
            }
            let slope = self.x.derivative(t);
            if slope.abs() < Self::EPSILON {
                return None;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }
        None
    }

    fn bisect(&self, fraction: f32) -> f32 {
        let (mut low, mut high) = (0.0f32, 1.0f32);
        let mut t = fraction;
        for _ in 0..16 {
            let error = self.x.sample(t) - fraction;
            if error.abs() < Self::EPSILON {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
        t
    }
}

/// Duration-based animation: a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    /// Compose's `AnimationConstants.DefaultDurationMillis` with the material curve.
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 bouncy, > 1.0 over-damped.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Speed (in progress units per second) below which the spring may rest.
    pub velocity_threshold: f32,
    /// Distance (in progress units) below which the spring may rest.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub const MIN_DAMPING_RATIO: f32 = 0.05;

    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }

    /// Damping is raised to [`MIN_DAMPING_RATIO`](Self::MIN_DAMPING_RATIO) so
    /// the spring always comes to rest. Non-finite values, and stiffness or
    /// thresholds that are not positive, fall back to the defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default_spring();
        let positive_or = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            damping_ratio: if self.damping_ratio.is_finite() {
                self.damping_ratio.max(Self::MIN_DAMPING_RATIO)
            } else {
                defaults.damping_ratio
            },
            stiffness: positive_or(self.stiffness, defaults.stiffness),
            velocity_threshold: positive_or(self.velocity_threshold, defaults.velocity_threshold),
            position_threshold: positive_or(self.position_threshold, defaults.position_threshold),
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation timing accepted by every animated transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

impl From<AnimationSpec> for AnimationType {
    fn from(spec: AnimationSpec) -> Self {
        AnimationType::Tween(spec)
    }
}

impl From<SpringSpec> for AnimationType {
    fn from(spec: SpringSpec) -> Self {
        AnimationType::Spring(spec)
    }
}

/// `tween(durationMillis)` with the default material easing.
pub fn tween(duration_millis: u64) -> AnimationType {
    AnimationType::Tween(AnimationSpec::tween(
        duration_millis,
        Easing::FastOutSlowInEasing,
    ))
}

/// Jumps to the target on the first frame.
pub fn snap() -> AnimationType {
    AnimationType::Tween(AnimationSpec::linear(0))
}

pub fn spring(damping_ratio: f32, stiffness: f32) -> AnimationType {
    AnimationType::Spring(
        SpringSpec {
            damping_ratio,
            stiffness,
            ..SpringSpec::default_spring()
        }
        .sanitized(),
    )
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
