#![no_main]

use std::cell::Cell;
use std::rc::Rc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use orrery_input::{ButtonModel, ButtonState, PointerEvent};

#[derive(Debug, Arbitrary)]
enum Op {
    Enter,
    Leave,
    Down,
    Up,
    Enable,
    Disable,
    Dispose,
}

fuzz_target!(|ops: Vec<Op>| {
    let model = ButtonModel::new();
    let fires = Rc::new(Cell::new(0u64));
    let fires_clone = Rc::clone(&fires);
    model.on_fire(move || fires_clone.set(fires_clone.get() + 1));

    let mut presses = 0u64;
    for op in ops {
        match op {
            Op::Enter => {
                model.handle(PointerEvent::Enter);
            }
            Op::Leave => {
                model.handle(PointerEvent::Leave);
            }
            Op::Down => {
                if model.handle(PointerEvent::Down) == Some(ButtonState::Pressed) {
                    presses += 1;
                }
            }
            Op::Up => {
                model.handle(PointerEvent::Up);
            }
            Op::Enable => model.set_enabled(true),
            Op::Disable => model.set_enabled(false),
            Op::Dispose => model.dispose(),
        }

        // A fire requires a preceding accepted press.
        assert!(fires.get() <= presses);
        // Disabled or disposed models sit in Idle.
        if model.is_disposed() || !model.is_enabled() {
            assert_eq!(model.state(), ButtonState::Idle);
        }
    }
});
