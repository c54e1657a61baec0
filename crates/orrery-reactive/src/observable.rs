#![forbid(unsafe_code)]

//! Observable value: a shared mutable cell with change notification.
//!
//! [`Observable<T>`] is the single-threaded state primitive everything else
//! in this crate builds on. One logical owner writes it; any number of
//! readers subscribe to it. Listeners receive `(new, old)` on every
//! committed change, in subscription order.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Cloning a handle shares the same inner state. Notification is
//! synchronous call-stack propagation: by the time `set` returns, every
//! listener has run.
//!
//! # Invariants
//!
//! 1. Setting a value equal to the current value (under the configured
//!    equality) is a no-op: no notification, no version bump.
//! 2. A listener is invoked with `(new, old)` exactly once per committed
//!    change, in subscription order.
//! 3. Version increments exactly once per committed change.
//! 4. A `set` issued from inside a listener is queued and applied after the
//!    current notification pass completes. Queued values are re-checked
//!    against the then-current value, so invariant 1 still holds.
//! 5. `unlink` takes effect synchronously: a listener removed mid-pass is
//!    not invoked later in that pass. A listener added mid-pass does not
//!    observe the in-flight change.
//!
//! # Failure Modes
//!
//! - **Mutation inside `with`**: the closure holds a borrow of the value;
//!   calling `set` on the same observable from inside it panics. Use `get`
//!   plus `set`, or defer the write.
//! - **Listener panics**: the panic propagates to the caller of `set`;
//!   remaining listeners in the pass are skipped. The committed value
//!   stays committed and the observable remains usable afterwards.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Token identifying a registered listener. Returned by [`Observable::link`]
/// and [`Observable::observe`]; pass it to [`Observable::unlink`] to remove
/// the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// A registered `(new, old)` callback.
pub(crate) struct Entry<T> {
    id: u64,
    /// Cleared by `unlink`; checked before every invocation so removal
    /// takes effect even while a notification pass holds a snapshot of the
    /// listener list.
    active: Cell<bool>,
    callback: Box<dyn Fn(&T, &T)>,
}

struct Inner<T> {
    value: T,
    eq: Box<dyn Fn(&T, &T) -> bool>,
    listeners: Vec<Rc<Entry<T>>>,
    next_id: u64,
    version: u64,
    /// True while a notification pass is running.
    notifying: bool,
    /// Values committed re-entrantly during a pass, applied FIFO afterwards.
    pending: VecDeque<T>,
}

/// A single mutable value with subscribe/unsubscribe and change
/// notification.
///
/// Cloning an `Observable` creates a new handle to the **same** inner
/// state.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable with `PartialEq` as the change detector.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_eq(initial, |a, b| a == b)
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Create an observable with a caller-supplied equality predicate.
    ///
    /// `set` commits (and notifies) only when `eq(current, candidate)` is
    /// false.
    #[must_use]
    pub fn with_eq(initial: T, eq: impl Fn(&T, &T) -> bool + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value: initial,
                eq: Box::new(eq),
                listeners: Vec::new(),
                next_id: 0,
                version: 0,
                notifying: false,
                pending: VecDeque::new(),
            })),
        }
    }

    /// A read/observe-only view of this observable, for handing to
    /// consumers that must not write.
    #[must_use]
    pub fn read_only(&self) -> ReadOnly<T> {
        ReadOnly {
            inner: self.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Access
// ---------------------------------------------------------------------------

impl<T: Clone + 'static> Observable<T> {
    /// Current value (cloned).
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure calls `set` on the same observable (re-entrant
    /// borrow).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of committed changes since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

impl<T: Clone + 'static> Observable<T> {
    /// Set the value.
    ///
    /// No-op when the candidate equals the current value. Otherwise commits
    /// and synchronously notifies every listener with `(new, old)`. A call
    /// made from inside a listener is queued and applied after the current
    /// pass (invariant 4).
    pub fn set(&self, value: T) {
        let mid_pass = self.inner.borrow().notifying;
        if mid_pass {
            self.inner.borrow_mut().pending.push_back(value);
            return;
        }
        self.apply(value);
        // Drain values queued by listeners during the pass above. Each
        // drained apply may queue more; the loop runs until quiescent.
        loop {
            let next = self.inner.borrow_mut().pending.pop_front();
            match next {
                Some(value) => self.apply(value),
                None => break,
            }
        }
    }

    /// Commit one value and run one notification pass.
    fn apply(&self, value: T) {
        let (new, old, entries) = {
            let mut inner = self.inner.borrow_mut();
            if (inner.eq)(&inner.value, &value) {
                return;
            }
            let old = std::mem::replace(&mut inner.value, value);
            let new = inner.value.clone();
            inner.version += 1;
            inner.notifying = true;
            // Snapshot so listeners may link/unlink freely while we iterate.
            (new, old, inner.listeners.clone())
        };
        // Clears the notifying flag even if a listener panics, so the
        // observable stays usable after an unwind.
        let _guard = NotifyGuard {
            inner: Rc::clone(&self.inner),
        };
        for entry in &entries {
            if entry.active.get() {
                (entry.callback)(&new, &old);
            }
        }
    }
}

struct NotifyGuard<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Drop for NotifyGuard<T> {
    fn drop(&mut self) {
        self.inner.borrow_mut().notifying = false;
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

impl<T: Clone + 'static> Observable<T> {
    /// Subscribe `f` and immediately invoke it once with
    /// `(current, current)`.
    ///
    /// The immediate call is a documented part of the contract, not a side
    /// effect: dependents start from a consistent view of the value without
    /// waiting for the first change.
    pub fn link(&self, f: impl Fn(&T, &T) + 'static) -> ListenerId {
        let entry = self.register(Box::new(f));
        let current = self.get();
        (entry.callback)(&current, &current);
        ListenerId(entry.id)
    }

    /// Subscribe `f` without the immediate initial call.
    pub fn observe(&self, f: impl Fn(&T, &T) + 'static) -> ListenerId {
        ListenerId(self.register(Box::new(f)).id)
    }

    /// Remove a subscription. Unknown or already-removed ids are a no-op.
    ///
    /// Takes effect synchronously: a listener unlinked while a notification
    /// pass is in flight receives no further invocation from that pass.
    pub fn unlink(&self, id: ListenerId) {
        let mut inner = self.inner.borrow_mut();
        if let Some(pos) = inner.listeners.iter().position(|e| e.id == id.0) {
            inner.listeners[pos].active.set(false);
            inner.listeners.remove(pos);
        }
    }

    /// Remove every subscription. For owning components tearing down: a
    /// disposed owner must not keep notifying destroyed observers.
    pub fn unlink_all(&self) {
        let mut inner = self.inner.borrow_mut();
        for entry in &inner.listeners {
            entry.active.set(false);
        }
        inner.listeners.clear();
    }

    fn register(&self, callback: Box<dyn Fn(&T, &T)>) -> Rc<Entry<T>> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let entry = Rc::new(Entry {
            id,
            active: Cell::new(true),
            callback,
        });
        inner.listeners.push(Rc::clone(&entry));
        entry
    }
}

// ---------------------------------------------------------------------------
// Read-only view
// ---------------------------------------------------------------------------

/// Read/observe-only view of an [`Observable`].
///
/// Consumers holding a `ReadOnly` can `get`, `with`, `link`, `observe`, and
/// `unlink`, but cannot write. The owning component keeps the writable
/// handle, which is how the one-owner-writer discipline is enforced at the
/// API boundary.
pub struct ReadOnly<T> {
    pub(crate) inner: Observable<T>,
}

impl<T> Clone for ReadOnly<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ReadOnly<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ReadOnly").field(&self.inner).finish()
    }
}

impl<T: Clone + 'static> ReadOnly<T> {
    /// Current value (cloned).
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    /// Number of committed changes since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version()
    }

    /// Subscribe with an immediate `(current, current)` call. See
    /// [`Observable::link`].
    pub fn link(&self, f: impl Fn(&T, &T) + 'static) -> ListenerId {
        self.inner.link(f)
    }

    /// Subscribe without the initial call. See [`Observable::observe`].
    pub fn observe(&self, f: impl Fn(&T, &T) + 'static) -> ListenerId {
        self.inner.observe(f)
    }

    /// Remove a subscription. See [`Observable::unlink`].
    pub fn unlink(&self, id: ListenerId) {
        self.inner.unlink(id);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
