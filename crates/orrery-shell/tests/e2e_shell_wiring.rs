//! End-to-end wiring test: a three-screen shell with a navigation bar, a
//! home screen grid, and a confirmation dialog, driven purely through
//! pointer events. Everything observable is linked the way a view layer
//! would link it; assertions check that the whole graph stays consistent
//! after every event.

use std::cell::RefCell;
use std::rc::Rc;

use orrery_input::PointerEvent;
use orrery_reactive::Observable;
use orrery_shell::{
    ColorScheme, ConfirmationConfig, ConfirmationModel, EventSink, HomeButtonModel,
    HomeTileStyle, LabelSize, NavBarButtonModel, NavButtonStyle, Navigator, Screen,
    ScreenSelector,
};

struct Recorder {
    events: RefCell<Vec<String>>,
    urls: RefCell<Vec<String>>,
}

impl EventSink for Recorder {
    fn emit(&self, event: &str) {
        self.events.borrow_mut().push(event.to_string());
    }
}

impl Navigator for Recorder {
    fn open(&self, url: &str) {
        self.urls.borrow_mut().push(url.to_string());
    }
}

struct Shell {
    selector: Rc<ScreenSelector>,
    scheme: Observable<ColorScheme>,
    nav_buttons: Vec<NavBarButtonModel>,
    tiles: Vec<HomeButtonModel>,
}

fn build_shell() -> Shell {
    let selector = Rc::new(
        ScreenSelector::new(vec![
            Screen::new("fields"),
            Screen::new("orbits"),
            Screen::new("collisions"),
        ])
        .unwrap(),
    );
    let scheme = Observable::new(ColorScheme::Normal);

    let nav_buttons = (0..3)
        .map(|i| {
            NavBarButtonModel::new(&selector, i, &scheme, NavButtonStyle::default()).unwrap()
        })
        .collect();
    let tiles = (0..3)
        .map(|i| HomeButtonModel::new(&selector, i, HomeTileStyle::default()).unwrap())
        .collect();

    Shell {
        selector,
        scheme,
        nav_buttons,
        tiles,
    }
}

fn click(events: impl Fn(PointerEvent) -> Option<orrery_input::ButtonState>) {
    events(PointerEvent::Enter);
    events(PointerEvent::Down);
    events(PointerEvent::Up);
}

#[test]
fn home_screen_two_tap_flow_updates_every_observer() {
    let shell = build_shell();

    // A view-style link on every tile's visual.
    let labels = Rc::new(RefCell::new(vec![LabelSize::Small; 3]));
    for (i, tile) in shell.tiles.iter().enumerate() {
        let labels_clone = Rc::clone(&labels);
        tile.visual()
            .link(move |new, _| labels_clone.borrow_mut()[i] = new.label);
    }
    // Eager link calls established the initial state.
    assert_eq!(
        *labels.borrow(),
        vec![LabelSize::Large, LabelSize::Small, LabelSize::Small]
    );

    // First tap on tile 1: selects without activating.
    click(|e| shell.tiles[1].handle(e));
    assert_eq!(shell.selector.selected_index().get(), 1);
    assert!(shell.selector.home_visible().get());
    assert_eq!(
        *labels.borrow(),
        vec![LabelSize::Small, LabelSize::Large, LabelSize::Small]
    );

    // The navigation bar saw the same selection change.
    assert_eq!(shell.nav_buttons[1].visual().get().opacity, 1.0);
    assert_eq!(shell.nav_buttons[0].visual().get().opacity, 0.5);

    // Second tap on tile 1: activates.
    click(|e| shell.tiles[1].handle(e));
    assert_eq!(shell.selector.selected_index().get(), 1);
    assert!(!shell.selector.home_visible().get());
}

#[test]
fn nav_bar_switches_in_one_tap_and_home_button_returns() {
    let shell = build_shell();

    // Leave the home screen on screen 0.
    click(|e| shell.tiles[0].handle(e));
    click(|e| shell.tiles[0].handle(e));
    assert!(!shell.selector.home_visible().get());

    // One tap on nav button 2 switches directly.
    click(|e| shell.nav_buttons[2].handle(e));
    assert_eq!(shell.selector.selected_index().get(), 2);
    assert!(!shell.selector.home_visible().get());

    // The home button brings the grid back with the selection intact.
    shell.selector.show_home();
    assert!(shell.selector.home_visible().get());
    assert_eq!(shell.selector.selected_index().get(), 2);
    assert_eq!(
        shell.tiles[2].visual().get().label,
        LabelSize::Large
    );
}

#[test]
fn scheme_flip_recomputes_all_hovered_buttons_at_once() {
    let shell = build_shell();

    shell.nav_buttons[0].handle(PointerEvent::Enter);
    shell.nav_buttons[1].handle(PointerEvent::Enter);

    use orrery_shell::Highlight;
    assert_eq!(shell.nav_buttons[0].visual().get().highlight, Highlight::Normal);
    assert_eq!(shell.nav_buttons[1].visual().get().highlight, Highlight::Normal);
    assert_eq!(shell.nav_buttons[2].visual().get().highlight, Highlight::None);

    shell.scheme.set(ColorScheme::Inverted);
    assert_eq!(shell.nav_buttons[0].visual().get().highlight, Highlight::Inverted);
    assert_eq!(shell.nav_buttons[1].visual().get().highlight, Highlight::Inverted);
    assert_eq!(shell.nav_buttons[2].visual().get().highlight, Highlight::None);
}

#[test]
fn disposed_button_goes_quiet_while_the_rest_keep_working() {
    let mut shell = build_shell();

    let frozen = shell.nav_buttons[2].visual().get();
    shell.nav_buttons[2].dispose();

    click(|e| shell.nav_buttons[1].handle(e));
    assert_eq!(shell.selector.selected_index().get(), 1);

    // The disposed button's visual no longer tracks anything.
    assert_eq!(shell.nav_buttons[2].visual().get(), frozen);
    // Its neighbours still do.
    assert_eq!(shell.nav_buttons[1].visual().get().opacity, 1.0);
}

#[test]
fn confirmation_flow_reaches_the_injected_capabilities() {
    let recorder = Rc::new(Recorder {
        events: RefCell::new(Vec::new()),
        urls: RefCell::new(Vec::new()),
    });
    let confirmation = ConfirmationModel::new(
        ConfirmationConfig::new("https://lab.example.org/session?course=astro")
            .with_student_id("ada"),
        Rc::clone(&recorder) as Rc<dyn EventSink>,
        Rc::clone(&recorder) as Rc<dyn Navigator>,
    );

    let visible_log = Rc::new(RefCell::new(Vec::new()));
    let visible_clone = Rc::clone(&visible_log);
    confirmation
        .dialog()
        .visible()
        .observe(move |new, _| visible_clone.borrow_mut().push(*new));

    confirmation.show();
    confirmation.confirm();

    assert_eq!(*visible_log.borrow(), vec![true, false]);
    assert_eq!(*recorder.events.borrow(), vec!["done.confirmed"]);
    assert_eq!(
        *recorder.urls.borrow(),
        vec!["https://lab.example.org/session?course=astro&studentId=ada"]
    );
}
