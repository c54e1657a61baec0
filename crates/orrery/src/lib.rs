#![forbid(unsafe_code)]

//! Orrery public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub mod prelude {
    pub use orrery_input as input;
    pub use orrery_reactive as reactive;
    pub use orrery_shell as shell;
}
