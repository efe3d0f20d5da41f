use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct FrameClockInner {
    callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_callback_id: Cell<FrameCallbackId>,
    last_frame_nanos: Cell<Option<u64>>,
}

impl FrameClockInner {
    fn register(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_callback_id.get();
        self.next_callback_id.set(id + 1);
        self.callbacks.borrow_mut().push_back(FrameCallbackEntry {
            id,
            callback: Some(callback),
        });
        id
    }

    fn cancel(&self, id: FrameCallbackId) {
        let mut callbacks = self.callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }
}

/// Frame source shared by every animation bound to one host surface.
///
/// Callbacks are one-shot: a callback registered while the clock is draining
/// runs on the next drain, not the current one.
#[derive(Clone)]
pub struct FrameClock {
    inner: Rc<FrameClockInner>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(FrameClockInner {
                callbacks: RefCell::new(VecDeque::new()),
                next_callback_id: Cell::new(1),
                last_frame_nanos: Cell::new(None),
            }),
        }
    }

    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.inner.register(Box::new(callback));
        FrameCallbackRegistration::new(Rc::downgrade(&self.inner), id)
    }

    /// Runs every callback that was pending when the drain started.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.last_frame_nanos.set(Some(frame_time_nanos));
        let mut callbacks = self.inner.callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        log::trace!(
            "draining {} frame callbacks at {frame_time_nanos}ns",
            pending.len()
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.callbacks.borrow().is_empty()
    }

    pub fn pending_callback_count(&self) -> usize {
        self.inner.callbacks.borrow().len()
    }

    /// Timestamp passed to the most recent drain, if any.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner.last_frame_nanos.get()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameClock")
            .field("pending", &self.pending_callback_count())
            .field("last_frame_nanos", &self.last_frame_nanos())
            .finish()
    }
}

/// Keeps a frame callback registered. Dropping it cancels the callback.
pub struct FrameCallbackRegistration {
    clock: Weak<FrameClockInner>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(clock: Weak<FrameClockInner>, id: FrameCallbackId) -> Self {
        Self {
            clock,
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<FrameCallbackId> {
        self.id
    }

    pub fn cancel(mut self) {
        self.cancel_inner();
    }

    /// Releases the registration without touching the queue. Call this once
    /// the callback has fired; before that the callback stays pending.
    pub fn disarm(mut self) {
        self.id = None;
    }

    fn cancel_inner(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(clock) = self.clock.upgrade() {
                clock.cancel(id);
            }
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.cancel_inner();
    }
}

#[cfg(test)]
#[path = "tests/frame_clock_tests.rs"]
mod tests;
