#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use orrery_shell::{Screen, ScreenSelector, TapResult};

#[derive(Debug, Arbitrary)]
enum Op {
    Home(u8),
    Nav(u8),
    ShowHome,
    SetIndex(u8),
}

fuzz_target!(|ops: Vec<Op>| {
    let screen_count = 4usize;
    let screens = (0..screen_count)
        .map(|i| Screen::new(format!("screen-{i}")))
        .collect();
    let selector = ScreenSelector::new(screens).unwrap();

    for op in ops {
        let result = match op {
            Op::Home(i) => selector.tap_home(i as usize).map(Some),
            Op::Nav(i) => selector.tap_nav(i as usize).map(Some),
            Op::ShowHome => {
                selector.show_home();
                Ok(None)
            }
            Op::SetIndex(i) => selector.set_selected_index(i as usize).map(|()| None),
        };

        let index = selector.selected_index().get();
        assert!(index < screen_count, "selection escaped the screen range");

        match result {
            // An error is only legal for an out-of-range index, and it
            // must leave a valid selection behind.
            Err(_) => {}
            Ok(Some(TapResult::Activated(i))) => {
                assert_eq!(i, index);
                assert!(!selector.home_visible().get());
            }
            Ok(Some(TapResult::Selected(i))) => assert_eq!(i, index),
            Ok(Some(TapResult::Ignored)) | Ok(None) => {}
        }
    }
});
