use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::ExpandState;

/// Change notification emitted after a mutating operation.
///
/// Within one operation the order is: offset, current state, target state,
/// then glide lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaffoldEvent {
    OffsetChanged {
        offset_x: f32,
    },
    CurrentStateChanged {
        previous: ExpandState,
        current: ExpandState,
    },
    /// The state a release would snap to changed. Fires mid-drag as
    /// thresholds are crossed.
    TargetStateChanged {
        previous: ExpandState,
        current: ExpandState,
    },
    GlideFinished {
        state: ExpandState,
    },
    /// A glide toward `state` was superseded or torn down.
    GlideCancelled {
        state: ExpandState,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub(crate) type EventBatch = SmallVec<[ScaffoldEvent; 4]>;

type Listener = Rc<dyn Fn(&ScaffoldEvent)>;

#[derive(Default)]
pub(crate) struct Listeners {
    entries: IndexMap<ListenerId, Listener>,
    next_id: u64,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: impl Fn(&ScaffoldEvent) + 'static) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.insert(id, Rc::new(listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.entries.shift_remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Clones the registry so listeners can run without it being borrowed.
    pub(crate) fn snapshot(&self) -> SmallVec<[Listener; 4]> {
        self.entries.values().cloned().collect()
    }
}
