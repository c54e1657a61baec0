#![forbid(unsafe_code)]

//! Screen selection coordinator.
//!
//! [`ScreenSelector`] owns the canonical "which screen is selected" and
//! "is the home screen visible" state shared by the home screen grid and
//! the navigation bar. Both read it through [`ReadOnly`] views; all
//! mutation flows through the tap protocol and checked setters here, which
//! is what keeps `selected_index` valid at every instant.
//!
//! Tap semantics differ by surface, deliberately:
//!
//! - **Home screen**: tap once to select, tap the already-selected screen
//!   again to activate it (hide the home screen). Two taps to launch.
//! - **Navigation bar**: one tap switches directly. The bar always shows
//!   the active screen set, so there is nothing to preview.
//!
//! # Invariants
//!
//! 1. `selected_index` is a valid index into the fixed screen list at all
//!    times. Out-of-range writes are rejected with state untouched.
//! 2. Activation never changes the selection; it only hides the home
//!    screen.
//! 3. All notifications are synchronous: dependents have observed a tap's
//!    effect by the time the tap call returns.

use orrery_reactive::{Observable, ReadOnly};

use crate::error::{Result, ShellError};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Descriptor for one simulation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Screen {
    pub name: String,
}

impl Screen {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Initial selector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectorConfig {
    /// Screen selected at startup.
    pub initial_index: usize,
    /// Whether the home screen is shown at startup.
    pub home_visible: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            home_visible: true,
        }
    }
}

/// Outcome of a tap, for callers that care (the view layer mostly does
/// not; it watches the observables instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapResult {
    /// The tap changed the selection to this index.
    Selected(usize),
    /// The tap activated this already-selected screen (home hidden).
    Activated(usize),
    /// The tap changed nothing.
    Ignored,
}

/// Owner of the shared screen-selection state.
pub struct ScreenSelector {
    screens: Vec<Screen>,
    selected_index: Observable<usize>,
    home_visible: Observable<bool>,
}

impl std::fmt::Debug for ScreenSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenSelector")
            .field("screens", &self.screens.len())
            .field("selected_index", &self.selected_index.get())
            .field("home_visible", &self.home_visible.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Construction and access
// ---------------------------------------------------------------------------

impl ScreenSelector {
    /// Create a selector with the default config: screen 0 selected, home
    /// screen visible.
    pub fn new(screens: Vec<Screen>) -> Result<Self> {
        Self::with_config(screens, SelectorConfig::default())
    }

    /// Create a selector with an explicit initial state.
    pub fn with_config(screens: Vec<Screen>, config: SelectorConfig) -> Result<Self> {
        if screens.is_empty() {
            return Err(ShellError::NoScreens);
        }
        if config.initial_index >= screens.len() {
            return Err(ShellError::invalid_index(
                config.initial_index,
                screens.len(),
            ));
        }
        Ok(Self {
            screens,
            selected_index: Observable::new(config.initial_index),
            home_visible: Observable::new(config.home_visible),
        })
    }

    /// Selected screen index, for linking.
    #[must_use]
    pub fn selected_index(&self) -> ReadOnly<usize> {
        self.selected_index.read_only()
    }

    /// Home screen visibility, for linking.
    #[must_use]
    pub fn home_visible(&self) -> ReadOnly<bool> {
        self.home_visible.read_only()
    }

    #[must_use]
    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    #[must_use]
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// The currently selected screen descriptor.
    #[must_use]
    pub fn selected_screen(&self) -> &Screen {
        &self.screens[self.selected_index.get()]
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.screens.len() {
            return Err(ShellError::invalid_index(index, self.screens.len()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tap protocol
// ---------------------------------------------------------------------------

impl ScreenSelector {
    /// Tap on a home screen tile: first tap selects, second tap on the
    /// already-selected tile activates. Taps while the home screen is
    /// hidden change nothing (the grid is not interactive then).
    pub fn tap_home(&self, index: usize) -> Result<TapResult> {
        self.check(index)?;
        if !self.home_visible.get() {
            return Ok(TapResult::Ignored);
        }
        let current = self.selected_index.get();
        if index == current {
            self.home_visible.set(false);
            Self::log_tap("home.activate", current, index);
            return Ok(TapResult::Activated(index));
        }
        self.selected_index.set(index);
        Self::log_tap("home.select", current, index);
        Ok(TapResult::Selected(index))
    }

    /// Tap on a navigation bar button: switches in a single tap. Tapping
    /// the active screen's button changes nothing.
    pub fn tap_nav(&self, index: usize) -> Result<TapResult> {
        self.check(index)?;
        let current = self.selected_index.get();
        if index == current {
            return Ok(TapResult::Ignored);
        }
        self.selected_index.set(index);
        Self::log_tap("nav.select", current, index);
        Ok(TapResult::Selected(index))
    }

    /// Bring the home screen back (the navigation bar's home button).
    pub fn show_home(&self) {
        self.home_visible.set(true);
    }

    /// Checked direct setter for the selection. Out-of-range indices are
    /// rejected and leave state unchanged.
    pub fn set_selected_index(&self, index: usize) -> Result<()> {
        self.check(index)?;
        self.selected_index.set(index);
        Ok(())
    }

    fn log_tap(reason: &str, from: usize, to: usize) {
        tracing::debug!(message = "selector.tap", reason, from, to);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
