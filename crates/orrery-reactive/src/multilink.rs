#![forbid(unsafe_code)]

//! Multi-source link: recompute derived state from several observables.
//!
//! A [`MultiLink`] watches N dependencies and invokes its callback with the
//! **current** value of every one of them whenever any single one changes.
//! The callback therefore never observes a partially-stale composite, which
//! is the point of this type: derived visual state (a color computed from
//! selection, hover, press, and color scheme at once) must be recomputed
//! from one consistent snapshot.
//!
//! Dependencies are anything implementing [`Source`]: plain
//! [`Observable`]s, [`ReadOnly`] views, or [`Derived`] values, freely
//! mixed. Constructors are arity-indexed (`link1` through `link4`), so an
//! empty dependency list is unrepresentable.
//!
//! # Invariants
//!
//! 1. The callback runs once immediately at creation with the current value
//!    of every dependency, in declaration order.
//! 2. Every dependency change re-invokes the callback with a fresh snapshot
//!    of all dependencies, read at invocation time.
//! 3. After `dispose()` the callback never runs again, including for a
//!    notification pass already in flight when `dispose()` was called.
//! 4. `dispose()` is idempotent, and dropping the link disposes it.
//!
//! # Failure Modes
//!
//! - **Callback writes to one of its own dependencies**: if that dependency
//!   is the one currently notifying, the write is queued by the observable
//!   and applied after the pass (convergence is the callback's problem). If
//!   it is a different, idle dependency, the link re-enters its own
//!   callback and panics on the re-entrant borrow. Structure callbacks to
//!   write only to non-dependency outputs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::derived::Derived;
use crate::observable::{ListenerId, Observable, ReadOnly};

// ---------------------------------------------------------------------------
// Source abstraction
// ---------------------------------------------------------------------------

/// A readable, watchable dependency for a [`MultiLink`].
///
/// `watch` registers a change trigger that carries no values; the link
/// re-reads `current()` on every dependency at invocation time, which is
/// what makes snapshots consistent.
pub trait Source<T: Clone> {
    /// The dependency's current value.
    fn current(&self) -> T;
    /// Register a change trigger. For derived sources the trigger fires
    /// only when the mapped value actually changes.
    fn watch(&self, trigger: Rc<dyn Fn()>) -> ListenerId;
    /// Remove a trigger registered by [`watch`](Self::watch).
    fn unwatch(&self, id: ListenerId);
}

impl<T: Clone + 'static> Source<T> for Observable<T> {
    fn current(&self) -> T {
        self.get()
    }

    fn watch(&self, trigger: Rc<dyn Fn()>) -> ListenerId {
        self.observe(move |_, _| (*trigger)())
    }

    fn unwatch(&self, id: ListenerId) {
        self.unlink(id);
    }
}

impl<T: Clone + 'static> Source<T> for ReadOnly<T> {
    fn current(&self) -> T {
        self.get()
    }

    fn watch(&self, trigger: Rc<dyn Fn()>) -> ListenerId {
        self.observe(move |_, _| (*trigger)())
    }

    fn unwatch(&self, id: ListenerId) {
        self.unlink(id);
    }
}

impl<S: Clone + 'static, T: Clone + PartialEq + 'static> Source<T> for Derived<S, T> {
    fn current(&self) -> T {
        self.get()
    }

    fn watch(&self, trigger: Rc<dyn Fn()>) -> ListenerId {
        self.observe(move |_, _| (*trigger)())
    }

    fn unwatch(&self, id: ListenerId) {
        self.unlink(id);
    }
}

// ---------------------------------------------------------------------------
// MultiLink
// ---------------------------------------------------------------------------

/// Watches N dependencies and recomputes a callback from their combined
/// current values on any change. See the module docs for the contract.
pub struct MultiLink {
    /// Shared with the trigger closure so disposal suppresses callbacks
    /// synchronously, even from a pass already holding the trigger.
    disposed: Rc<Cell<bool>>,
    teardown: Vec<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for MultiLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiLink")
            .field("disposed", &self.disposed.get())
            .finish()
    }
}

macro_rules! multilink_ctor {
    ($name:ident, $doc:literal, $(($src:ident, $ty:ident, $val:ident, $id:ident)),+) => {
        #[doc = $doc]
        ///
        /// Subscribes to every dependency, then invokes `callback` once with
        /// their current values. Afterwards any dependency change re-invokes
        /// it with a fresh snapshot of all of them.
        pub fn $name<$($ty,)+>(
            $($src: &(impl Source<$ty> + Clone + 'static),)+
            callback: impl FnMut($(&$ty,)+) + 'static,
        ) -> Self
        where
            $($ty: Clone + 'static,)+
        {
            let disposed = Rc::new(Cell::new(false));
            let callback = RefCell::new(callback);
            let run: Rc<dyn Fn()> = {
                let disposed = Rc::clone(&disposed);
                $(let $src = $src.clone();)+
                Rc::new(move || {
                    if disposed.get() {
                        return;
                    }
                    $(let $val = $src.current();)+
                    let mut cb = callback.borrow_mut();
                    (&mut *cb)($(&$val,)+)
                })
            };
            let mut teardown: Vec<Box<dyn FnOnce()>> = Vec::new();
            $(
                let $id = $src.watch(Rc::clone(&run));
                let source = $src.clone();
                teardown.push(Box::new(move || source.unwatch($id)));
            )+
            (*run)();
            Self { disposed, teardown }
        }
    };
}

impl MultiLink {
    multilink_ctor!(
        link1,
        "Link a callback to a single dependency. For pure projections of one source prefer [`Derived`]; a one-dependency link is for callbacks with effects that need explicit disposal.",
        (a, A, va, ida)
    );

    multilink_ctor!(
        link2,
        "Link a callback to two dependencies.",
        (a, A, va, ida),
        (b, B, vb, idb)
    );

    multilink_ctor!(
        link3,
        "Link a callback to three dependencies.",
        (a, A, va, ida),
        (b, B, vb, idb),
        (c, C, vc, idc)
    );

    multilink_ctor!(
        link4,
        "Link a callback to four dependencies.",
        (a, A, va, ida),
        (b, B, vb, idb),
        (c, C, vc, idc),
        (d, D, vd, idd)
    );

    /// Unsubscribe from every dependency. Idempotent; effective
    /// synchronously, so a pass that is mid-flight cannot deliver a late
    /// callback after this returns.
    pub fn dispose(&mut self) {
        if self.disposed.replace(true) {
            return;
        }
        for tear in self.teardown.drain(..) {
            tear();
        }
    }

    /// Whether [`dispose`](Self::dispose) has run (explicitly or via drop).
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl Drop for MultiLink {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
