//! Host-driven frame clock and local task queue for the draggable scaffold.
//!
//! Nothing in here owns a thread or an event loop. The host calls
//! [`FrameClock::drain_frame_callbacks`] once per rendered frame and
//! [`TaskQueue::run_until_stalled`] whenever it wants spawned futures to make
//! progress.

mod frame_clock;
mod tasks;

pub use frame_clock::{FrameCallbackId, FrameCallbackRegistration, FrameClock};
pub use tasks::{TaskHandle, TaskQueue};

/// Frame interval of a 60 Hz display, in nanoseconds.
pub const FRAME_INTERVAL_60HZ_NANOS: u64 = 16_666_667;
