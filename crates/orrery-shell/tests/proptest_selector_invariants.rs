//! Property-based invariant tests for the screen selection coordinator.
//!
//! These tests verify structural invariants under arbitrary tap sequences:
//!
//! 1. `selected_index` is always a valid index into the screen list.
//! 2. The coordinator matches a reference model of the two-tap/one-tap
//!    protocol.
//! 3. Out-of-range taps are rejected and change nothing.
//! 4. Activation never moves the selection.

use orrery_shell::{Screen, ScreenSelector, ShellError, TapResult};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Tap {
    Home(usize),
    Nav(usize),
    ShowHome,
}

fn tap(screen_count: usize) -> impl Strategy<Value = Tap> {
    // Indices range one past the end so rejection paths get exercised.
    prop_oneof![
        (0..=screen_count).prop_map(Tap::Home),
        (0..=screen_count).prop_map(Tap::Nav),
        Just(Tap::ShowHome),
    ]
}

fn scenario() -> impl Strategy<Value = (usize, Vec<Tap>)> {
    (1usize..6).prop_flat_map(|count| {
        (
            Just(count),
            proptest::collection::vec(tap(count), 0..64),
        )
    })
}

/// Reference model of the protocol, kept deliberately naive.
struct Reference {
    count: usize,
    selected: usize,
    home_visible: bool,
}

impl Reference {
    fn step(&mut self, tap: Tap) -> Option<TapResult> {
        match tap {
            Tap::Home(i) => {
                if i >= self.count {
                    return None;
                }
                if !self.home_visible {
                    Some(TapResult::Ignored)
                } else if i == self.selected {
                    self.home_visible = false;
                    Some(TapResult::Activated(i))
                } else {
                    self.selected = i;
                    Some(TapResult::Selected(i))
                }
            }
            Tap::Nav(i) => {
                if i >= self.count {
                    return None;
                }
                if i == self.selected {
                    Some(TapResult::Ignored)
                } else {
                    self.selected = i;
                    Some(TapResult::Selected(i))
                }
            }
            Tap::ShowHome => {
                self.home_visible = true;
                Some(TapResult::Ignored)
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 2 + 3 + 4. Coordinator matches the reference model
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coordinator_matches_reference_model((count, taps) in scenario()) {
        let screens = (0..count).map(|i| Screen::new(format!("screen-{i}"))).collect();
        let selector = ScreenSelector::new(screens).unwrap();
        let mut reference = Reference { count, selected: 0, home_visible: true };

        for &step in &taps {
            let expected = reference.step(step);
            match step {
                Tap::Home(i) => {
                    let got = selector.tap_home(i);
                    match expected {
                        Some(result) => prop_assert_eq!(got, Ok(result)),
                        None => prop_assert_eq!(
                            got,
                            Err(ShellError::invalid_index(i, count))
                        ),
                    }
                }
                Tap::Nav(i) => {
                    let got = selector.tap_nav(i);
                    match expected {
                        Some(result) => prop_assert_eq!(got, Ok(result)),
                        None => prop_assert_eq!(
                            got,
                            Err(ShellError::invalid_index(i, count))
                        ),
                    }
                }
                Tap::ShowHome => selector.show_home(),
            }

            prop_assert_eq!(selector.selected_index().get(), reference.selected);
            prop_assert_eq!(selector.home_visible().get(), reference.home_visible);
            prop_assert!(selector.selected_index().get() < count, "index escaped range");
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Rejected taps leave the observables completely untouched
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rejected_taps_do_not_notify(count in 1usize..6) {
        let screens = (0..count).map(|i| Screen::new(format!("screen-{i}"))).collect();
        let selector = ScreenSelector::new(screens).unwrap();

        let before_index = selector.selected_index().version();
        let before_home = selector.home_visible().version();

        prop_assert!(selector.tap_home(count).is_err());
        prop_assert!(selector.tap_nav(count + 3).is_err());
        prop_assert!(selector.set_selected_index(usize::MAX).is_err());

        prop_assert_eq!(selector.selected_index().version(), before_index);
        prop_assert_eq!(selector.home_visible().version(), before_home);
    }
}
