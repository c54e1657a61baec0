#![forbid(unsafe_code)]

//! Shell models for Orrery: screen selection, navigation bar and home
//! screen buttons, and dialogs.
//!
//! The shell owns the canonical interaction state of a multi-screen
//! simulation. The view layer constructs the visual tree, forwards pointer
//! events to the models here, and links the published observables; it
//! never derives interaction state on its own. Side effects leave the
//! shell only through injected capabilities ([`EventSink`], [`Navigator`]).

pub mod dialog;
pub mod error;
pub mod home;
pub mod nav_bar;
pub mod selector;

pub use dialog::{ConfirmationConfig, ConfirmationModel, DialogModel, EventSink, Navigator};
pub use error::{Result, ShellError};
pub use home::{HomeButtonModel, HomeTileStyle, HomeTileVisual, LabelSize};
pub use nav_bar::{ColorScheme, Highlight, NavBarButtonModel, NavButtonStyle, NavButtonVisual, Rgb};
pub use selector::{Screen, ScreenSelector, SelectorConfig, TapResult};
