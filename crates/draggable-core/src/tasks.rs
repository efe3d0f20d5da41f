use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

type LocalFuture = Pin<Box<dyn Future<Output = ()> + 'static>>;

struct TaskSlot {
    id: u64,
    future: LocalFuture,
    wake: Arc<TaskWake>,
}

/// Wake flag shared between a task's waker and the queue.
struct TaskWake {
    woken: AtomicBool,
}

impl futures_task::ArcWake for TaskWake {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.woken.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct TaskQueueInner {
    tasks: RefCell<VecDeque<TaskSlot>>,
    // Tasks spawned while `run_until_stalled` holds the queue.
    incoming: RefCell<Vec<TaskSlot>>,
    cancelled: RefCell<Vec<u64>>,
    next_id: Cell<u64>,
}

/// Single-threaded queue of `!Send` futures polled on the UI thread.
///
/// Futures are only polled from [`TaskQueue::run_until_stalled`], so their
/// side effects always happen at a point the host chose.
#[derive(Clone, Default)]
pub struct TaskQueue {
    inner: Rc<TaskQueueInner>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&self, future: impl Future<Output = ()> + 'static) -> TaskHandle {
        let id = self.inner.next_id.get() + 1;
        self.inner.next_id.set(id);
        let slot = TaskSlot {
            id,
            future: Box::pin(future),
            wake: Arc::new(TaskWake {
                woken: AtomicBool::new(true),
            }),
        };
        match self.inner.tasks.try_borrow_mut() {
            Ok(mut tasks) => tasks.push_back(slot),
            Err(_) => self.inner.incoming.borrow_mut().push(slot),
        }
        TaskHandle {
            queue: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Polls every woken task until none is woken. Returns the number of
    /// tasks that completed.
    pub fn run_until_stalled(&self) -> usize {
        let mut completed = 0;
        loop {
            self.absorb_incoming();
            let mut progressed = false;
            let mut tasks = self.inner.tasks.borrow_mut();
            let mut remaining = VecDeque::with_capacity(tasks.len());
            while let Some(mut slot) = tasks.pop_front() {
                if self.take_cancelled(slot.id) {
                    continue;
                }
                if !slot.wake.woken.swap(false, Ordering::SeqCst) {
                    remaining.push_back(slot);
                    continue;
                }
                progressed = true;
                let waker = futures_task::waker(Arc::clone(&slot.wake));
                let mut cx = Context::from_waker(&waker);
                match slot.future.as_mut().poll(&mut cx) {
                    Poll::Ready(()) => completed += 1,
                    Poll::Pending => remaining.push_back(slot),
                }
            }
            *tasks = remaining;
            drop(tasks);
            if !progressed && self.inner.incoming.borrow().is_empty() {
                break;
            }
        }
        let tasks = self.inner.tasks.borrow();
        self.inner
            .cancelled
            .borrow_mut()
            .retain(|id| tasks.iter().any(|slot| slot.id == *id));
        completed
    }

    pub fn has_pending_tasks(&self) -> bool {
        self.len() > 0
    }

    pub fn len(&self) -> usize {
        // Called from inside a polled task the queue is already borrowed;
        // the running task itself is then the one pending entry we know of.
        let running = self
            .inner
            .tasks
            .try_borrow()
            .map(|tasks| tasks.len())
            .unwrap_or(1);
        running + self.inner.incoming.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn absorb_incoming(&self) {
        let incoming: Vec<TaskSlot> = self.inner.incoming.borrow_mut().drain(..).collect();
        if !incoming.is_empty() {
            self.inner.tasks.borrow_mut().extend(incoming);
        }
    }

    fn take_cancelled(&self, id: u64) -> bool {
        let mut cancelled = self.inner.cancelled.borrow_mut();
        match cancelled.iter().position(|candidate| *candidate == id) {
            Some(index) => {
                cancelled.swap_remove(index);
                true
            }
            None => false,
        }
    }
}

/// Handle to a spawned task. Dropping it leaves the task running.
pub struct TaskHandle {
    queue: Weak<TaskQueueInner>,
    id: u64,
}

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Drops the task's future the next time the queue runs.
    pub fn cancel(self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.cancelled.borrow_mut().push(self.id);
        }
    }
}

#[cfg(test)]
#[path = "tests/tasks_tests.rs"]
mod tests;
