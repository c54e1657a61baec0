#![forbid(unsafe_code)]

//! Home screen tile model.
//!
//! One [`HomeButtonModel`] per screen tile on the home screen. A tap on a
//! tile runs the selector's two-tap protocol: the first tap selects (the
//! tile grows and brightens), a second tap on the already-selected tile
//! activates the screen and hides the home screen.
//!
//! The tile's visual state is a pure function of one input (whether its
//! screen is selected), so it is published as a [`Derived`] of the
//! selector's index rather than a multi-source link: the view links it,
//! gets the eager initial call, and hears about exactly the flips.

use std::rc::Rc;

use orrery_input::{ButtonModel, ButtonState, PointerEvent};
use orrery_reactive::Derived;

use crate::error::{Result, ShellError};
use crate::selector::ScreenSelector;

// ---------------------------------------------------------------------------
// Configuration and visual state
// ---------------------------------------------------------------------------

/// Which of the tile's two prepared labels the view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSize {
    Small,
    Large,
}

/// Scale and opacity configuration for home screen tiles.
///
/// Defaults: the selected tile renders at double scale and full opacity
/// with its large label; unselected tiles at base scale, half opacity,
/// small label.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HomeTileStyle {
    pub selected_scale: f32,
    pub unselected_scale: f32,
    pub selected_opacity: f32,
    pub unselected_opacity: f32,
}

impl Default for HomeTileStyle {
    fn default() -> Self {
        Self {
            selected_scale: 2.0,
            unselected_scale: 1.0,
            selected_opacity: 1.0,
            unselected_opacity: 0.5,
        }
    }
}

impl HomeTileStyle {
    /// Set the selected/unselected scale pair.
    #[must_use]
    pub fn with_scales(mut self, selected: f32, unselected: f32) -> Self {
        self.selected_scale = selected;
        self.unselected_scale = unselected;
        self
    }

    /// Set the selected/unselected opacity pair.
    #[must_use]
    pub fn with_opacities(mut self, selected: f32, unselected: f32) -> Self {
        self.selected_opacity = selected;
        self.unselected_opacity = unselected;
        self
    }

    fn visual(&self, selected: bool) -> HomeTileVisual {
        if selected {
            HomeTileVisual {
                opacity: self.selected_opacity,
                scale: self.selected_scale,
                label: LabelSize::Large,
            }
        } else {
            HomeTileVisual {
                opacity: self.unselected_opacity,
                scale: self.unselected_scale,
                label: LabelSize::Small,
            }
        }
    }
}

/// Visual state the view layer renders for one home screen tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeTileVisual {
    pub opacity: f32,
    pub scale: f32,
    pub label: LabelSize,
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Interaction and visual-state model for one home screen tile.
pub struct HomeButtonModel {
    screen_index: usize,
    button: ButtonModel,
    selected: Derived<usize, bool>,
    visual: Derived<usize, HomeTileVisual>,
}

impl std::fmt::Debug for HomeButtonModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeButtonModel")
            .field("screen_index", &self.screen_index)
            .field("visual", &self.visual.get())
            .finish()
    }
}

impl HomeButtonModel {
    /// Create the model for the tile at `screen_index`.
    pub fn new(
        selector: &Rc<ScreenSelector>,
        screen_index: usize,
        style: HomeTileStyle,
    ) -> Result<Self> {
        if screen_index >= selector.screen_count() {
            return Err(ShellError::invalid_index(
                screen_index,
                selector.screen_count(),
            ));
        }

        let button = ButtonModel::new();
        let tap_target = Rc::clone(selector);
        button.on_fire(move || {
            // Index was validated above, so the tap cannot fail.
            let _ = tap_target.tap_home(screen_index);
        });

        let selected = selector.selected_index().value_equals(screen_index);
        let visual = selector
            .selected_index()
            .map(move |&index| style.visual(index == screen_index));

        Ok(Self {
            screen_index,
            button,
            selected,
            visual,
        })
    }

    #[must_use]
    pub fn screen_index(&self) -> usize {
        self.screen_index
    }

    /// The pointer state machine, for wiring to the host's input dispatch.
    #[must_use]
    pub fn button(&self) -> &ButtonModel {
        &self.button
    }

    /// Whether this tile's screen is the selected one.
    #[must_use]
    pub fn selected(&self) -> Derived<usize, bool> {
        self.selected.clone()
    }

    /// Published visual state, for the view layer to link.
    #[must_use]
    pub fn visual(&self) -> Derived<usize, HomeTileVisual> {
        self.visual.clone()
    }

    /// Forward one pointer event to the button model.
    pub fn handle(&self, event: PointerEvent) -> Option<ButtonState> {
        self.button.handle(event)
    }

    /// Tear down the tile's interactivity. Idempotent. View-side links on
    /// [`visual`](Self::visual) are the view's to unlink.
    pub fn dispose(&mut self) {
        self.button.dispose();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
