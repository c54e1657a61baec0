#![forbid(unsafe_code)]

//! Button interaction model: pointer events in, semantic button state out.
//!
//! [`ButtonModel`] is a four-state machine over [`PointerEvent`]s. The
//! `over` and `down` flags are [`Observable`]s so visual links can watch
//! them; a **fire** event (click semantics) is emitted exactly on the
//! release of a press that ends over the element.
//!
//! States and transitions:
//!
//! ```text
//! Idle --Enter--> Hover --Down--> Pressed --Up--> Hover   (fire)
//!                 Hover --Leave--> Idle
//!                 Pressed --Leave--> PressedOutside
//!                 PressedOutside --Enter--> Pressed
//!                 PressedOutside --Up--> Idle             (no fire)
//! ```
//!
//! # Invariants
//!
//! 1. `down` is true only if the press started in `Hover`; dragging off
//!    while held tracks as `PressedOutside` and suppresses fire.
//! 2. Fire is emitted exactly on `Pressed --Up--> Hover`, after the flags
//!    are updated, so fire listeners observe the post-release state.
//! 3. Disabling forces `Idle` (both flags cleared, no fire) and suppresses
//!    every transition until re-enabled.
//!
//! # Failure Modes
//!
//! - **Orphan `Up`** (no matching prior `Down`): ignored. Pointer capture
//!   can be lost externally, so an unmatched release is expected input,
//!   not a defect.
//! - Any other event with no transition from the current state is ignored
//!   the same way.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use orrery_reactive::{Observable, ReadOnly};

use crate::pointer::PointerEvent;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Semantic state of a [`ButtonModel`], derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Not over, not down.
    Idle,
    /// Over, not down.
    Hover,
    /// Over and down.
    Pressed,
    /// Down, but the pointer dragged off while held.
    PressedOutside,
}

/// Token identifying a fire subscription. Returned by
/// [`ButtonModel::on_fire`]; pass it to [`ButtonModel::remove_fire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FireId(u64);

struct FireEntry {
    id: u64,
    active: Cell<bool>,
    callback: Box<dyn Fn()>,
}

/// Pointer-driven state machine for one interactive element.
pub struct ButtonModel {
    over: Observable<bool>,
    down: Observable<bool>,
    enabled: Observable<bool>,
    fire_listeners: RefCell<Vec<Rc<FireEntry>>>,
    next_fire_id: Cell<u64>,
    disposed: Cell<bool>,
}

impl std::fmt::Debug for ButtonModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonModel")
            .field("state", &self.state())
            .field("enabled", &self.enabled.get())
            .finish()
    }
}

impl Default for ButtonModel {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Construction and access
// ---------------------------------------------------------------------------

impl ButtonModel {
    /// Create an enabled model in `Idle`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            over: Observable::new(false),
            down: Observable::new(false),
            enabled: Observable::new(true),
            fire_listeners: RefCell::new(Vec::new()),
            next_fire_id: Cell::new(0),
            disposed: Cell::new(false),
        }
    }

    /// Current semantic state, derived from the flags.
    #[must_use]
    pub fn state(&self) -> ButtonState {
        match (self.over.get(), self.down.get()) {
            (false, false) => ButtonState::Idle,
            (true, false) => ButtonState::Hover,
            (true, true) => ButtonState::Pressed,
            (false, true) => ButtonState::PressedOutside,
        }
    }

    /// Observable hover flag, for visual links.
    #[must_use]
    pub fn over(&self) -> ReadOnly<bool> {
        self.over.read_only()
    }

    /// Observable press flag, for visual links.
    #[must_use]
    pub fn down(&self) -> ReadOnly<bool> {
        self.down.read_only()
    }

    /// Observable enabled flag.
    #[must_use]
    pub fn enabled(&self) -> ReadOnly<bool> {
        self.enabled.read_only()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over.get()
    }

    #[must_use]
    pub fn is_down(&self) -> bool {
        self.down.get()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

// ---------------------------------------------------------------------------
// Event handling
// ---------------------------------------------------------------------------

impl ButtonModel {
    /// Feed one pointer event through the state machine.
    ///
    /// Returns `Some(new_state)` when a transition occurred and `None` when
    /// the event was absorbed (disabled model, orphan release, or no
    /// transition from the current state).
    pub fn handle(&self, event: PointerEvent) -> Option<ButtonState> {
        if self.disposed.get() || !self.enabled.get() {
            return None;
        }
        let from = self.state();
        let to = match (from, event) {
            (ButtonState::Idle, PointerEvent::Enter) => {
                self.over.set(true);
                ButtonState::Hover
            }
            (ButtonState::Hover, PointerEvent::Leave) => {
                self.over.set(false);
                ButtonState::Idle
            }
            (ButtonState::Hover, PointerEvent::Down) => {
                self.down.set(true);
                ButtonState::Pressed
            }
            (ButtonState::Pressed, PointerEvent::Up) => {
                self.down.set(false);
                self.emit_fire();
                ButtonState::Hover
            }
            (ButtonState::Pressed, PointerEvent::Leave) => {
                self.over.set(false);
                ButtonState::PressedOutside
            }
            (ButtonState::PressedOutside, PointerEvent::Enter) => {
                self.over.set(true);
                ButtonState::Pressed
            }
            (ButtonState::PressedOutside, PointerEvent::Up) => {
                self.down.set(false);
                ButtonState::Idle
            }
            _ => return None,
        };
        #[cfg(feature = "tracing")]
        Self::log_transition(from, to);
        Some(to)
    }

    /// `handle(PointerEvent::Enter)`.
    pub fn pointer_enter(&self) -> Option<ButtonState> {
        self.handle(PointerEvent::Enter)
    }

    /// `handle(PointerEvent::Leave)`.
    pub fn pointer_leave(&self) -> Option<ButtonState> {
        self.handle(PointerEvent::Leave)
    }

    /// `handle(PointerEvent::Down)`.
    pub fn pointer_down(&self) -> Option<ButtonState> {
        self.handle(PointerEvent::Down)
    }

    /// `handle(PointerEvent::Up)`.
    pub fn pointer_up(&self) -> Option<ButtonState> {
        self.handle(PointerEvent::Up)
    }

    /// Enable or disable the model. Disabling forces `Idle` (flags
    /// cleared, no fire) and suppresses all transitions until re-enabled.
    /// No-op on a disposed model.
    pub fn set_enabled(&self, enabled: bool) {
        if self.disposed.get() {
            return;
        }
        self.enabled.set(enabled);
        if !enabled {
            self.down.set(false);
            self.over.set(false);
        }
    }

    /// Tear the model down: flags are cleared, fire listeners are dropped,
    /// and every further event or enable call is ignored. Idempotent.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.down.set(false);
        self.over.set(false);
        let mut listeners = self.fire_listeners.borrow_mut();
        for entry in listeners.iter() {
            entry.active.set(false);
        }
        listeners.clear();
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    #[cfg(feature = "tracing")]
    fn log_transition(from: ButtonState, to: ButtonState) {
        tracing::debug!(message = "button.transition", from = ?from, to = ?to);
    }
}

// ---------------------------------------------------------------------------
// Fire subscription
// ---------------------------------------------------------------------------

impl ButtonModel {
    /// Subscribe to the fire event. Listeners run in registration order,
    /// synchronously, after the release transition commits.
    pub fn on_fire(&self, f: impl Fn() + 'static) -> FireId {
        let id = self.next_fire_id.get();
        self.next_fire_id.set(id + 1);
        self.fire_listeners.borrow_mut().push(Rc::new(FireEntry {
            id,
            active: Cell::new(true),
            callback: Box::new(f),
        }));
        FireId(id)
    }

    /// Remove a fire subscription. Unknown ids are a no-op.
    pub fn remove_fire(&self, id: FireId) {
        let mut listeners = self.fire_listeners.borrow_mut();
        if let Some(pos) = listeners.iter().position(|e| e.id == id.0) {
            listeners[pos].active.set(false);
            listeners.remove(pos);
        }
    }

    fn emit_fire(&self) {
        // Snapshot so listeners may subscribe or unsubscribe re-entrantly.
        let entries = self.fire_listeners.borrow().clone();
        for entry in &entries {
            if entry.active.get() {
                (entry.callback)();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
