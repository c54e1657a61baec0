#![forbid(unsafe_code)]

//! Pointer input for Orrery: the canonical event type and the button
//! interaction state machine that turns raw pointer events into semantic
//! hover/press/fire state.

pub mod button;
pub mod pointer;

pub use button::{ButtonModel, ButtonState, FireId};
pub use pointer::PointerEvent;
