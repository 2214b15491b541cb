//! Single-threaded change notification.
//!
//! - [`Observable`]: shared, version-tracked value that notifies subscribers
//!   when it changes.
//! - [`Subscription`]: guard that keeps a callback registered; dropping it
//!   unsubscribes.
//! - [`Watch`]: a change channel that records the latest notified value and
//!   reports it once per change when polled.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per `set` that changes the value.
//! 2. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 3. Subscribers are notified in registration order, after the interior
//!    borrow is released.
//! 4. A dropped [`Subscription`] is never called again.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

type Callback<T> = dyn Fn(&T);

struct ObservableInner<T> {
    value:       T,
    version:     u64,
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A shared value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** value.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Replaces the value and notifies subscribers.
    ///
    /// Returns `false` without notifying if `value` equals the current value.
    pub fn set(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
        true
    }

    /// Registers `callback` to run after every change.
    ///
    /// The callback stays registered while the returned guard is alive.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            inner.subscribers.push(Rc::downgrade(&callback));
        }
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Number of subscribers whose guard is still alive
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    fn notify(&self) {
        let (value, version, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            let callbacks: Vec<Rc<Callback<T>>> = inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect();
            (inner.value.clone(), inner.version, callbacks)
        };

        trace!(version, subscribers = callbacks.len(), "observable changed");
        for callback in &callbacks {
            callback(&value);
        }
    }
}

/// Keeps a subscriber callback registered until dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

struct WatchState<T> {
    latest: T,
    /// Value returned by the previous successful poll, `None` before the first
    seen:   Option<T>,
}

/// Change channel over an [`Observable`].
///
/// Every notification overwrites the recorded value, so several writes between
/// two polls collapse into the last one. A poll reports the recorded value
/// only when it differs from what the previous poll reported; the first poll
/// always reports.
pub struct Watch<T> {
    state:         Rc<RefCell<WatchState<T>>>,
    _subscription: Subscription,
}

impl<T: fmt::Debug> fmt::Debug for Watch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Watch")
            .field("latest", &state.latest)
            .field("seen", &state.seen)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Watch<T> {
    pub fn new(source: &Observable<T>) -> Self {
        let state = Rc::new(RefCell::new(WatchState {
            latest: source.get(),
            seen:   None,
        }));

        let weak_state = Rc::downgrade(&state);
        let subscription = source.subscribe(move |value| {
            if let Some(strong) = weak_state.upgrade() {
                strong.borrow_mut().latest = value.clone();
            }
        });

        Self {
            state,
            _subscription: subscription,
        }
    }

    /// Returns the latest value if it changed since the previous poll.
    pub fn poll(&self) -> Option<T> {
        let mut state = self.state.borrow_mut();
        if state.seen.as_ref() == Some(&state.latest) {
            return None;
        }
        let latest = state.latest.clone();
        state.seen = Some(latest.clone());
        Some(latest)
    }

    /// Latest notified value, without marking it seen
    pub fn latest(&self) -> T {
        self.state.borrow().latest.clone()
    }
}
