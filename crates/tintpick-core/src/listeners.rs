//! Scoped input listener subscriptions.
//!
//! The host owns a [`ListenerRegistry`] and routes global input to the picker
//! only for the listener kinds currently subscribed. Subscriptions are RAII
//! guards: dropping one unsubscribes it, so every exit path of a popup or an
//! eyedropper session releases what it acquired.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Global input streams the picker can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    KeyUp,
    PointerMove,
    PointerDown,
    PointerUp,
}

/// How a listener is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// The listener never blocks the host's input pipeline.
    pub passive: bool,
    /// The listener runs in the capture phase.
    pub capture: bool,
}

impl ListenerOptions {
    pub const PASSIVE: Self = Self {
        passive: true,
        capture: false,
    };

    pub const CAPTURE: Self = Self {
        passive: false,
        capture: true,
    };
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    entries: Vec<(u64, ListenerKind, ListenerOptions)>,
}

/// Host-owned set of active listeners. Cloning yields another handle to the
/// same registry.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a listener kind until the returned guard is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, kind: ListenerKind, options: ListenerOptions) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push((id, kind, options));
        Subscription {
            id,
            kind,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Whether anything listens to `kind`.
    pub fn is_subscribed(&self, kind: ListenerKind) -> bool {
        self.inner
            .borrow()
            .entries
            .iter()
            .any(|(_, k, _)| *k == kind)
    }

    /// Options of the first listener of `kind`.
    pub fn options(&self, kind: ListenerKind) -> Option<ListenerOptions> {
        self.inner
            .borrow()
            .entries
            .iter()
            .find(|(_, k, _)| *k == kind)
            .map(|(_, _, options)| *options)
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An active listener. Unsubscribes on drop.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    kind: ListenerKind,
    registry: Weak<RefCell<RegistryInner>>,
}

impl Subscription {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .entries
                .retain(|(id, _, _)| *id != self.id);
        }
    }
}
