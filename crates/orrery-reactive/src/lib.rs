#![forbid(unsafe_code)]

//! Reactive state primitives for Orrery.
//!
//! This crate provides the change-tracking layer the shell components are
//! built on:
//!
//! - [`Observable`]: a shared mutable value with `(new, old)` change
//!   notification and a [`ReadOnly`] view for non-owning consumers.
//! - [`Derived`]: a read-only value computed from one source observable
//!   through a pure function (notably [`Observable::value_equals`]).
//! - [`MultiLink`]: an operator that recomputes a callback from the
//!   combined current values of several dependencies whenever any one of
//!   them changes, with explicit, idempotent teardown.
//!
//! # Architecture
//!
//! Everything here is single-threaded and synchronous: `Rc<RefCell<..>>`
//! shared ownership, call-stack notification, deterministic subscription
//! order. There is no deferred queue and no background thread; by the time
//! a `set` returns, every dependent has observed the change.
//!
//! # Invariants
//!
//! 1. One listener invocation per committed change, in subscription order.
//! 2. Setting an equal value is a no-op (no notification, no version bump).
//! 3. Links fire once eagerly at creation so dependents start consistent.
//! 4. A multi-source callback always receives a snapshot in which every
//!    dependency reflects state after the triggering change.
//! 5. Teardown (`unlink` / `dispose`) takes effect synchronously; disposed
//!    links never fire again.

pub mod derived;
pub mod multilink;
pub mod observable;

pub use derived::Derived;
pub use multilink::{MultiLink, Source};
pub use observable::{ListenerId, Observable, ReadOnly};
