//! Animation specs and samplers for the draggable scaffold.
//!
//! Provides time-based tweens with easing curves and spring physics. Nothing
//! here schedules frames: callers feed frame timestamps into a
//! [`FloatAnimation`] and apply the sampled value themselves.

mod animation;
mod float_animation;

pub use animation::{snap, spring, tween, AnimationSpec, AnimationType, Easing, Lerp, SpringSpec};
pub use float_animation::{AnimationFrame, FloatAnimation};
