#![forbid(unsafe_code)]

//! Derived observable: a read-only value computed from one source.
//!
//! [`Derived<T, U>`] pairs a source [`Observable<T>`] with a pure
//! `Fn(&T) -> U`. It has no identity beyond its source: reads recompute
//! from the source's latest value, so a stale read is impossible, and there
//! is no cached state to fall out of sync.
//!
//! The map function must be pure. It runs on every read and twice per
//! source change (old and new value) to decide whether the derived value
//! actually moved.
//!
//! # Invariants
//!
//! 1. `get()` equals `map(source.get())` at every point in time.
//! 2. Listeners fire only when the mapped value changes under
//!    `U: PartialEq`. A source change that maps to an equal value is
//!    silent, so a derived flag cannot double-fire while the source moves
//!    between values on the same side of the predicate.
//! 3. Listener delivery is synchronous and ordered with the source's other
//!    listeners (registration order on the source).

use std::rc::Rc;

use crate::observable::{ListenerId, Observable, ReadOnly};

/// A read-only observable computed from one source observable and a pure
/// function.
///
/// Created via [`Observable::map`] or [`Observable::value_equals`]. Cloning
/// shares the source handle and the map function.
pub struct Derived<T, U> {
    source: Observable<T>,
    map: Rc<dyn Fn(&T) -> U>,
}

impl<T, U> Clone for Derived<T, U> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            map: Rc::clone(&self.map),
        }
    }
}

impl<T: Clone + 'static, U: std::fmt::Debug + Clone + PartialEq + 'static> std::fmt::Debug
    for Derived<T, U>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Derived").field("value", &self.get()).finish()
    }
}

impl<T: Clone + 'static, U: Clone + PartialEq + 'static> Derived<T, U> {
    /// Current derived value, recomputed from the live source.
    #[must_use]
    pub fn get(&self) -> U {
        self.source.with(|v| (*self.map)(v))
    }

    /// Access the current derived value by reference.
    pub fn with<R>(&self, f: impl FnOnce(&U) -> R) -> R {
        let value = self.get();
        f(&value)
    }

    /// Subscribe `f` and immediately invoke it once with
    /// `(current, current)`, mirroring [`Observable::link`].
    pub fn link(&self, f: impl Fn(&U, &U) + 'static) -> ListenerId {
        let f = Rc::new(f);
        let id = {
            let map = Rc::clone(&self.map);
            let f = Rc::clone(&f);
            self.source.observe(move |new, old| {
                let mapped_new = (*map)(new);
                let mapped_old = (*map)(old);
                if mapped_new != mapped_old {
                    (*f)(&mapped_new, &mapped_old);
                }
            })
        };
        let current = self.get();
        (*f)(&current, &current);
        id
    }

    /// Subscribe without the initial call. `f` runs only when the mapped
    /// value changes.
    pub fn observe(&self, f: impl Fn(&U, &U) + 'static) -> ListenerId {
        let map = Rc::clone(&self.map);
        self.source.observe(move |new, old| {
            let mapped_new = (*map)(new);
            let mapped_old = (*map)(old);
            if mapped_new != mapped_old {
                f(&mapped_new, &mapped_old);
            }
        })
    }

    /// Remove a subscription created by [`link`](Self::link) or
    /// [`observe`](Self::observe).
    pub fn unlink(&self, id: ListenerId) {
        self.source.unlink(id);
    }
}

// ---------------------------------------------------------------------------
// Constructors on the source types
// ---------------------------------------------------------------------------

impl<T: Clone + 'static> Observable<T> {
    /// Derive a read-only observable by mapping this one through a pure
    /// function.
    #[must_use]
    pub fn map<U: Clone + PartialEq + 'static>(
        &self,
        f: impl Fn(&T) -> U + 'static,
    ) -> Derived<T, U> {
        Derived {
            source: self.clone(),
            map: Rc::new(f),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Derive a boolean observable that is true exactly when the current
    /// value equals `target`.
    #[must_use]
    pub fn value_equals(&self, target: T) -> Derived<T, bool> {
        self.map(move |v| *v == target)
    }
}

impl<T: Clone + 'static> ReadOnly<T> {
    /// Derive a read-only observable from this view. See
    /// [`Observable::map`].
    #[must_use]
    pub fn map<U: Clone + PartialEq + 'static>(
        &self,
        f: impl Fn(&T) -> U + 'static,
    ) -> Derived<T, U> {
        self.inner.map(f)
    }
}

impl<T: Clone + PartialEq + 'static> ReadOnly<T> {
    /// Derive an is-equal flag from this view. See
    /// [`Observable::value_equals`].
    #[must_use]
    pub fn value_equals(&self, target: T) -> Derived<T, bool> {
        self.inner.value_equals(target)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
