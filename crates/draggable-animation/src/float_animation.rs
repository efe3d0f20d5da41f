use crate::{AnimationType, Lerp};

const NANOS_PER_SECOND: f32 = 1_000_000_000.0;

/// Integration step for spring physics, in seconds.
const SPRING_TIMESTEP: f32 = 1.0 / 240.0;

/// Result of sampling an animation at one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub value: f32,
    pub finished: bool,
}

/// A single `f32` animation from `start` to `target`.
///
/// The first sampled frame becomes the animation's time origin, so the host's
/// clock may start at any value. Once finished the value is exactly `target`.
#[derive(Debug, Clone)]
pub struct FloatAnimation {
    start: f32,
    target: f32,
    animation: AnimationType,
    start_time_nanos: Option<u64>,
    last_time_nanos: Option<u64>,
    value: f32,
    // Spring state, in progress units where 0 = start and 1 = target.
    progress: f32,
    velocity: f32,
    finished: bool,
}

impl FloatAnimation {
    /// Spring parameters that could not settle are replaced by defaults.
    pub fn new(start: f32, target: f32, animation: AnimationType) -> Self {
        let animation = match animation {
            AnimationType::Spring(spec) => AnimationType::Spring(spec.sanitized()),
            tween => tween,
        };
        Self {
            start,
            target,
            animation,
            start_time_nanos: None,
            last_time_nanos: None,
            value: start,
            progress: 0.0,
            velocity: 0.0,
            finished: false,
        }
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn animation(&self) -> AnimationType {
        self.animation
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Restarts from `from` toward `target` with the same timing. The next
    /// sample becomes the new time origin.
    pub fn retarget(&mut self, from: f32, target: f32) {
        *self = Self::new(from, target, self.animation);
    }

    /// Advances the animation to `frame_time_nanos`. Frames earlier than the
    /// previous one are treated as repeats of it.
    pub fn sample(&mut self, frame_time_nanos: u64) -> AnimationFrame {
        if !self.finished {
            let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
            let now = frame_time_nanos.max(self.last_time_nanos.unwrap_or(start_time));
            match self.animation {
                AnimationType::Tween(spec) => {
                    let elapsed = now.saturating_sub(start_time);
                    let delay = spec.delay_millis.saturating_mul(1_000_000);
                    if elapsed >= delay {
                        let duration = spec.duration_millis.saturating_mul(1_000_000);
                        let linear = if duration == 0 {
                            1.0
                        } else {
                            ((elapsed - delay) as f32 / duration as f32).clamp(0.0, 1.0)
                        };
                        self.value = self.start.lerp(&self.target, spec.easing.transform(linear));
                        if linear >= 1.0 {
                            self.finish();
                        }
                    }
                }
                AnimationType::Spring(spec) => {
                    if (self.target - self.start).abs() < f32::EPSILON {
                        self.finish();
                    } else {
                        let last = self.last_time_nanos.unwrap_or(start_time);
                        let dt = now.saturating_sub(last) as f32 / NANOS_PER_SECOND;
                        let damping = 2.0 * spec.damping_ratio * spec.stiffness.sqrt();
                        let mut remaining = dt;
                        while remaining > 0.0 {
                            let step = SPRING_TIMESTEP.min(remaining);
                            let displacement = self.progress - 1.0;
                            let force = -spec.stiffness * displacement - damping * self.velocity;
                            self.velocity += force * step;
                            self.progress = (self.progress + self.velocity * step).clamp(0.0, 2.0);
                            remaining -= step;
                        }
                        self.value = self.start.lerp(&self.target, self.progress);

                        let at_rest = self.velocity.abs() < spec.velocity_threshold;
                        let near_target = (self.progress - 1.0).abs() < spec.position_threshold;
                        if dt > 0.0 && at_rest && near_target {
                            self.finish();
                        }
                    }
                }
            }
            self.last_time_nanos = Some(now);
        }
        AnimationFrame {
            value: self.value,
            finished: self.finished,
        }
    }

    fn finish(&mut self) {
        self.value = self.target;
        self.progress = 1.0;
        self.velocity = 0.0;
        if !self.finished {
            log::trace!("animation {} -> {} finished", self.start, self.target);
        }
        self.finished = true;
    }
}

#[cfg(test)]
#[path = "tests/float_animation_tests.rs"]
mod tests;
