#![forbid(unsafe_code)]

//! Keyboard notification plumbing.
//!
//! A [`NotificationCenter`] is a single-threaded broadcast hub for on-screen
//! keyboard frame events. Observers subscribe per notification name with a
//! stable [`ObserverId`] and are invoked in registration order when an event
//! is posted. There is no object filter: any poster reaches every observer of
//! the matching name.
//!
//! The center is a cheap-clone handle (`Rc<RefCell<..>>` shared state, the
//! same shape as the rest of the single-threaded runtime surface). Callbacks
//! receive the mutable [`ViewTree`] alongside the event so geometry reactions
//! happen in place; subscriber storage is released before callbacks run, so
//! a callback may re-enter the center (e.g. to unsubscribe itself).
//!
//! # Invariants
//!
//! 1. `remove_observer(o, n)` removes every entry matching both `o` and `n`,
//!    and nothing else.
//! 2. Observers are notified in registration order per name.
//! 3. Posting an event for which no observer is registered is a no-op.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;

use crate::geometry::Rect;
use crate::view::ViewTree;

/// Global counter for unique observer ids.
static OBSERVER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable identity of an observer across subscribe/unsubscribe pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Allocate a fresh unique id.
    pub fn next() -> Self {
        Self(OBSERVER_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Well-known notification names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationName {
    KeyboardWillChangeFrame,
    KeyboardWillHide,
}

/// Payload of a keyboard frame notification.
///
/// `end_frame` is the keyboard's frame once the change settles. A malformed
/// notification may lack it; observers treat that as "nothing to do".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardInfo {
    pub end_frame: Option<Rect>,
}

/// A keyboard event delivered through the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardEvent {
    WillChangeFrame(KeyboardInfo),
    WillHide,
}

impl KeyboardEvent {
    /// The notification name this event is delivered under.
    pub const fn name(self) -> NotificationName {
        match self {
            Self::WillChangeFrame(_) => NotificationName::KeyboardWillChangeFrame,
            Self::WillHide => NotificationName::KeyboardWillHide,
        }
    }
}

/// Observer callback. Receives the tree to mutate and the posted event.
pub type ObserverFn = Rc<dyn Fn(&mut ViewTree, &KeyboardEvent)>;

#[derive(Default)]
struct CenterState {
    observers: AHashMap<NotificationName, Vec<(ObserverId, ObserverFn)>>,
}

/// Single-threaded keyboard notification hub.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    inner: Rc<RefCell<CenterState>>,
}

impl NotificationCenter {
    /// Create an empty center.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `observer` to `name`.
    pub fn add_observer(&self, observer: ObserverId, name: NotificationName, callback: ObserverFn) {
        self.inner
            .borrow_mut()
            .observers
            .entry(name)
            .or_default()
            .push((observer, callback));
        tracing::trace!(observer = observer.id(), ?name, "observer added");
    }

    /// Remove every subscription of `observer` under `name`.
    pub fn remove_observer(&self, observer: ObserverId, name: NotificationName) {
        let mut state = self.inner.borrow_mut();
        if let Some(entries) = state.observers.get_mut(&name) {
            entries.retain(|(id, _)| *id != observer);
        }
        tracing::trace!(observer = observer.id(), ?name, "observer removed");
    }

    /// Whether `observer` has at least one subscription under `name`.
    pub fn has_observer(&self, observer: ObserverId, name: NotificationName) -> bool {
        self.inner
            .borrow()
            .observers
            .get(&name)
            .is_some_and(|entries| entries.iter().any(|(id, _)| *id == observer))
    }

    /// Number of subscriptions under `name`.
    pub fn observer_count(&self, name: NotificationName) -> usize {
        self.inner
            .borrow()
            .observers
            .get(&name)
            .map_or(0, Vec::len)
    }

    /// Post an event to every observer of its name, in registration order.
    pub fn post(&self, tree: &mut ViewTree, event: &KeyboardEvent) {
        let callbacks: Vec<ObserverFn> = {
            let state = self.inner.borrow();
            state
                .observers
                .get(&event.name())
                .map(|entries| entries.iter().map(|(_, cb)| Rc::clone(cb)).collect())
                .unwrap_or_default()
        };
        tracing::trace!(name = ?event.name(), observers = callbacks.len(), "post");
        for callback in callbacks {
            callback(tree, event);
        }
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("NotificationCenter")
            .field(
                "will_change_frame",
                &state
                    .observers
                    .get(&NotificationName::KeyboardWillChangeFrame)
                    .map_or(0, Vec::len),
            )
            .field(
                "will_hide",
                &state
                    .observers
                    .get(&NotificationName::KeyboardWillHide)
                    .map_or(0, Vec::len),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_observer(counter: Rc<Cell<u32>>) -> ObserverFn {
        Rc::new(move |_tree, _event| counter.set(counter.get() + 1))
    }

    #[test]
    fn post_reaches_matching_observers_only() {
        let center = NotificationCenter::new();
        let mut tree = ViewTree::new();
        let hits = Rc::new(Cell::new(0));
        let observer = ObserverId::next();
        center.add_observer(
            observer,
            NotificationName::KeyboardWillHide,
            counting_observer(Rc::clone(&hits)),
        );

        center.post(
            &mut tree,
            &KeyboardEvent::WillChangeFrame(KeyboardInfo::default()),
        );
        assert_eq!(hits.get(), 0);

        center.post(&mut tree, &KeyboardEvent::WillHide);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn remove_observer_is_scoped_to_name() {
        let center = NotificationCenter::new();
        let observer = ObserverId::next();
        let hits = Rc::new(Cell::new(0));
        center.add_observer(
            observer,
            NotificationName::KeyboardWillChangeFrame,
            counting_observer(Rc::clone(&hits)),
        );
        center.add_observer(
            observer,
            NotificationName::KeyboardWillHide,
            counting_observer(Rc::clone(&hits)),
        );

        center.remove_observer(observer, NotificationName::KeyboardWillHide);
        assert!(center.has_observer(observer, NotificationName::KeyboardWillChangeFrame));
        assert!(!center.has_observer(observer, NotificationName::KeyboardWillHide));
    }

    #[test]
    fn remove_only_targets_the_given_observer() {
        let center = NotificationCenter::new();
        let a = ObserverId::next();
        let b = ObserverId::next();
        let hits = Rc::new(Cell::new(0));
        center.add_observer(
            a,
            NotificationName::KeyboardWillHide,
            counting_observer(Rc::clone(&hits)),
        );
        center.add_observer(
            b,
            NotificationName::KeyboardWillHide,
            counting_observer(Rc::clone(&hits)),
        );

        center.remove_observer(a, NotificationName::KeyboardWillHide);
        assert_eq!(center.observer_count(NotificationName::KeyboardWillHide), 1);
        assert!(center.has_observer(b, NotificationName::KeyboardWillHide));
    }

    #[test]
    fn post_with_no_observers_is_noop() {
        let center = NotificationCenter::new();
        let mut tree = ViewTree::new();
        center.post(&mut tree, &KeyboardEvent::WillHide);
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let center = NotificationCenter::new();
        let mut tree = ViewTree::new();
        let observer = ObserverId::next();
        let inner_center = center.clone();
        center.add_observer(
            observer,
            NotificationName::KeyboardWillHide,
            Rc::new(move |_tree, _event| {
                inner_center.remove_observer(observer, NotificationName::KeyboardWillHide);
            }),
        );

        center.post(&mut tree, &KeyboardEvent::WillHide);
        assert_eq!(center.observer_count(NotificationName::KeyboardWillHide), 0);
    }

    #[test]
    fn observer_ids_are_unique() {
        let a = ObserverId::next();
        let b = ObserverId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn event_names_match_variants() {
        assert_eq!(
            KeyboardEvent::WillChangeFrame(KeyboardInfo::default()).name(),
            NotificationName::KeyboardWillChangeFrame
        );
        assert_eq!(
            KeyboardEvent::WillHide.name(),
            NotificationName::KeyboardWillHide
        );
    }
}
