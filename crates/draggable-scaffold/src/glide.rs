//! Completion handle for the controller's animated transitions.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::ExpandState;

/// How a glide ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlideOutcome {
    /// The offset reached the canonical offset of the state.
    Finished(ExpandState),
    /// A newer drag or transition took over, or the controller was dropped.
    Cancelled,
}

#[derive(Default)]
struct GlideSignal {
    outcome: Option<GlideOutcome>,
    waker: Option<Waker>,
}

/// Resolves once a glide finishes or is superseded.
///
/// Dropping a `Glide` does not stop the animation; it keeps running on the
/// controller's frame clock.
pub struct Glide {
    target: ExpandState,
    signal: Rc<RefCell<GlideSignal>>,
}

impl Glide {
    pub(crate) fn pending(target: ExpandState) -> (Self, GlideCompleter) {
        let signal = Rc::new(RefCell::new(GlideSignal::default()));
        let completer = GlideCompleter {
            signal: Rc::clone(&signal),
        };
        (Self { target, signal }, completer)
    }

    pub fn target(&self) -> ExpandState {
        self.target
    }

    pub fn is_complete(&self) -> bool {
        self.signal.borrow().outcome.is_some()
    }

    pub fn outcome(&self) -> Option<GlideOutcome> {
        self.signal.borrow().outcome
    }
}

impl Future for Glide {
    type Output = GlideOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut signal = self.signal.borrow_mut();
        match signal.outcome {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                signal.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl std::fmt::Debug for Glide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Glide")
            .field("target", &self.target)
            .field("outcome", &self.outcome())
            .finish()
    }
}

/// Controller-side half of a [`Glide`].
pub(crate) struct GlideCompleter {
    signal: Rc<RefCell<GlideSignal>>,
}

impl GlideCompleter {
    pub(crate) fn complete(self, outcome: GlideOutcome) {
        let waker = {
            let mut signal = self.signal.borrow_mut();
            if signal.outcome.is_some() {
                return;
            }
            signal.outcome = Some(outcome);
            signal.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}
