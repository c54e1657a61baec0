#![no_main]

use orrery_input::{ButtonModel, ButtonState, PointerEvent};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let model = ButtonModel::new();
    for &byte in data {
        let event = match byte % 4 {
            0 => PointerEvent::Enter,
            1 => PointerEvent::Leave,
            2 => PointerEvent::Down,
            _ => PointerEvent::Up,
        };
        model.handle(event);

        // Flags must always encode one of the four legal states, and the
        // press invariant must hold: down without over means the press
        // started in Hover and dragged off.
        match model.state() {
            ButtonState::Idle => {
                assert!(!model.is_over() && !model.is_down());
            }
            ButtonState::Hover => {
                assert!(model.is_over() && !model.is_down());
            }
            ButtonState::Pressed => {
                assert!(model.is_over() && model.is_down());
            }
            ButtonState::PressedOutside => {
                assert!(!model.is_over() && model.is_down());
            }
        }
    }
});
