#![forbid(unsafe_code)]

//! Navigation bar button model.
//!
//! One [`NavBarButtonModel`] per screen. It owns the pointer state machine
//! for its button and derives the button's visual state (text color,
//! opacity, highlight) from four inputs at once: whether its screen is
//! selected, whether the button is pressed, whether it is hovered, and the
//! shell's color scheme. The derivation runs through one [`MultiLink`], so
//! the published [`NavButtonVisual`] is always computed from a consistent
//! snapshot; a selection change can never be seen with a stale hover flag.
//!
//! Firing the button (press released over it) taps the selector's
//! navigation protocol: a single tap switches screens.

use std::rc::Rc;

use orrery_input::{ButtonModel, ButtonState, PointerEvent};
use orrery_reactive::{Derived, MultiLink, Observable, ReadOnly};

use crate::error::{Result, ShellError};
use crate::selector::ScreenSelector;

// ---------------------------------------------------------------------------
// Colors and configuration
// ---------------------------------------------------------------------------

/// 24-bit color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0, 0, 0);
    pub const GRAY: Self = Self(128, 128, 128);
    pub const WHITE: Self = Self(255, 255, 255);
}

/// Shell-wide color scheme. An observable input to every visual link, so
/// flipping it recomputes all button visuals the same way a selection
/// change does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorScheme {
    #[default]
    Normal,
    Inverted,
}

/// Which hover/press highlight overlay the view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    None,
    Normal,
    Inverted,
}

/// Color and opacity configuration for navigation bar buttons.
///
/// Defaults mirror the shell's stock look: black text for the selected
/// screen, gray for the rest, identical in both schemes until a caller
/// overrides the inverted pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavButtonStyle {
    pub selected_text: Rgb,
    pub unselected_text: Rgb,
    pub inverted_selected_text: Rgb,
    pub inverted_unselected_text: Rgb,
    /// Opacity when this screen is the selected one.
    pub selected_opacity: f32,
    /// Opacity while unselected and pressed.
    pub pressed_opacity: f32,
    /// Opacity while unselected and idle.
    pub idle_opacity: f32,
}

impl Default for NavButtonStyle {
    fn default() -> Self {
        Self {
            selected_text: Rgb::BLACK,
            unselected_text: Rgb::GRAY,
            inverted_selected_text: Rgb::BLACK,
            inverted_unselected_text: Rgb::GRAY,
            selected_opacity: 1.0,
            pressed_opacity: 0.65,
            idle_opacity: 0.5,
        }
    }
}

impl NavButtonStyle {
    /// Set the text colors used under [`ColorScheme::Normal`].
    #[must_use]
    pub fn with_text(mut self, selected: Rgb, unselected: Rgb) -> Self {
        self.selected_text = selected;
        self.unselected_text = unselected;
        self
    }

    /// Set the text colors used under [`ColorScheme::Inverted`].
    #[must_use]
    pub fn with_inverted_text(mut self, selected: Rgb, unselected: Rgb) -> Self {
        self.inverted_selected_text = selected;
        self.inverted_unselected_text = unselected;
        self
    }

    /// Set the three opacity levels (selected, pressed, idle).
    #[must_use]
    pub fn with_opacities(mut self, selected: f32, pressed: f32, idle: f32) -> Self {
        self.selected_opacity = selected;
        self.pressed_opacity = pressed;
        self.idle_opacity = idle;
        self
    }

    fn text_color(&self, selected: bool, scheme: ColorScheme) -> Rgb {
        match (scheme, selected) {
            (ColorScheme::Normal, true) => self.selected_text,
            (ColorScheme::Normal, false) => self.unselected_text,
            (ColorScheme::Inverted, true) => self.inverted_selected_text,
            (ColorScheme::Inverted, false) => self.inverted_unselected_text,
        }
    }

    fn opacity(&self, selected: bool, down: bool) -> f32 {
        if selected {
            self.selected_opacity
        } else if down {
            self.pressed_opacity
        } else {
            self.idle_opacity
        }
    }
}

/// Visual state the view layer renders for one navigation button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavButtonVisual {
    pub text_color: Rgb,
    pub opacity: f32,
    pub highlight: Highlight,
}

fn compute_visual(
    style: &NavButtonStyle,
    selected: bool,
    down: bool,
    over: bool,
    scheme: ColorScheme,
) -> NavButtonVisual {
    let highlight = if over || down {
        match scheme {
            ColorScheme::Normal => Highlight::Normal,
            ColorScheme::Inverted => Highlight::Inverted,
        }
    } else {
        Highlight::None
    };
    NavButtonVisual {
        text_color: style.text_color(selected, scheme),
        opacity: style.opacity(selected, down),
        highlight,
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Interaction and visual-state model for one navigation bar button.
pub struct NavBarButtonModel {
    screen_index: usize,
    button: ButtonModel,
    selected: Derived<usize, bool>,
    visual: Observable<NavButtonVisual>,
    link: MultiLink,
}

impl std::fmt::Debug for NavBarButtonModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavBarButtonModel")
            .field("screen_index", &self.screen_index)
            .field("visual", &self.visual.get())
            .finish()
    }
}

impl NavBarButtonModel {
    /// Create the model for the screen at `screen_index`.
    ///
    /// Fails fast on an out-of-range index; everything downstream then
    /// relies on the index being valid.
    pub fn new(
        selector: &Rc<ScreenSelector>,
        screen_index: usize,
        scheme: &Observable<ColorScheme>,
        style: NavButtonStyle,
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
            let _ = tap_target.tap_nav(screen_index);
        });

        let selected = selector.selected_index().value_equals(screen_index);
        let visual = Observable::new(compute_visual(
            &style,
            selected.get(),
            button.is_down(),
            button.is_over(),
            scheme.get(),
        ));

        let output = visual.clone();
        let link = MultiLink::link4(
            &selected,
            &button.down(),
            &button.over(),
            scheme,
            move |&sel, &down, &over, &scheme| {
                output.set(compute_visual(&style, sel, down, over, scheme));
            },
        );

        Ok(Self {
            screen_index,
            button,
            selected,
            visual,
            link,
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

    /// Whether this button's screen is the selected one.
    #[must_use]
    pub fn selected(&self) -> Derived<usize, bool> {
        self.selected.clone()
    }

    /// Published visual state, for the view layer to link.
    #[must_use]
    pub fn visual(&self) -> ReadOnly<NavButtonVisual> {
        self.visual.read_only()
    }

    /// Forward one pointer event to the button model.
    pub fn handle(&self, event: PointerEvent) -> Option<ButtonState> {
        self.button.handle(event)
    }

    /// Tear down: the visual link stops recomputing and the button goes
    /// quiet. Idempotent.
    pub fn dispose(&mut self) {
        self.link.dispose();
        self.button.dispose();
        self.visual.unlink_all();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
