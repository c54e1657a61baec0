#![forbid(unsafe_code)]

//! Dialog models and the capabilities they act through.
//!
//! Dialogs own no content here (credits text, link labels, and layout are
//! the view layer's business); they own visibility state and, for the
//! confirmation flow, the completion side effects. Side effects go through
//! injected capabilities instead of ambient globals: an [`EventSink`] for
//! emitting shell events and a [`Navigator`] for opening URLs. Hosts pass
//! whatever implementations suit them; tests pass recorders.

use std::cell::Cell;
use std::rc::Rc;

use orrery_reactive::{Observable, ReadOnly};

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Receives named shell events (session completion, dialog actions).
pub trait EventSink {
    fn emit(&self, event: &str);
}

/// Opens a URL in whatever the host considers a browser.
pub trait Navigator {
    fn open(&self, url: &str);
}

// ---------------------------------------------------------------------------
// Plain dialog
// ---------------------------------------------------------------------------

/// Visibility state for a modal dialog (the about dialog uses this
/// directly).
pub struct DialogModel {
    visible: Observable<bool>,
    disposed: Cell<bool>,
}

impl std::fmt::Debug for DialogModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogModel")
            .field("visible", &self.visible.get())
            .field("disposed", &self.disposed.get())
            .finish()
    }
}

impl Default for DialogModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogModel {
    /// Create a hidden dialog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: Observable::new(false),
            disposed: Cell::new(false),
        }
    }

    pub fn show(&self) {
        if self.disposed.get() {
            return;
        }
        self.visible.set(true);
    }

    pub fn hide(&self) {
        if self.disposed.get() {
            return;
        }
        self.visible.set(false);
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Visibility, for the view layer to link.
    #[must_use]
    pub fn visible(&self) -> ReadOnly<bool> {
        self.visible.read_only()
    }

    /// Hide and drop all visibility listeners. Idempotent; a disposed
    /// dialog ignores `show`/`hide`.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.visible.set(false);
        self.visible.unlink_all();
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

// ---------------------------------------------------------------------------
// Confirmation dialog
// ---------------------------------------------------------------------------

/// Configuration for the confirmation ("are you sure?") flow.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmationConfig {
    /// URL to navigate to once the user confirms.
    pub done_url: String,
    /// Session identifier appended to the done URL as a query parameter,
    /// when present.
    pub student_id: Option<String>,
    /// Event emitted on the sink when the user confirms.
    pub event_name: String,
}

impl ConfirmationConfig {
    #[must_use]
    pub fn new(done_url: impl Into<String>) -> Self {
        Self {
            done_url: done_url.into(),
            student_id: None,
            event_name: "done.confirmed".to_string(),
        }
    }

    #[must_use]
    pub fn with_student_id(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = Some(student_id.into());
        self
    }

    #[must_use]
    pub fn with_event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = event_name.into();
        self
    }
}

/// Model for the confirmation dialog: visibility plus the completion side
/// effects, performed through the injected capabilities.
pub struct ConfirmationModel {
    dialog: DialogModel,
    config: ConfirmationConfig,
    events: Rc<dyn EventSink>,
    navigator: Rc<dyn Navigator>,
}

impl std::fmt::Debug for ConfirmationModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationModel")
            .field("visible", &self.dialog.is_visible())
            .field("config", &self.config)
            .finish()
    }
}

impl ConfirmationModel {
    #[must_use]
    pub fn new(
        config: ConfirmationConfig,
        events: Rc<dyn EventSink>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            dialog: DialogModel::new(),
            config,
            events,
            navigator,
        }
    }

    /// The underlying visibility model.
    #[must_use]
    pub fn dialog(&self) -> &DialogModel {
        &self.dialog
    }

    pub fn show(&self) {
        self.dialog.show();
    }

    /// The user confirmed: emit the completion event, navigate to the done
    /// URL, and hide the dialog. No-op once disposed.
    pub fn confirm(&self) {
        if self.dialog.is_disposed() {
            return;
        }
        tracing::debug!(message = "dialog.confirm", event = %self.config.event_name);
        self.events.emit(&self.config.event_name);
        self.navigator.open(&self.done_url());
        self.dialog.hide();
    }

    /// The user backed out: hide without side effects.
    pub fn deny(&self) {
        self.dialog.hide();
    }

    pub fn dispose(&self) {
        self.dialog.dispose();
    }

    /// The done URL with the student id appended as a query parameter.
    /// Joins with `&` when the configured URL already carries a query
    /// string, `?` otherwise.
    #[must_use]
    pub fn done_url(&self) -> String {
        match &self.config.student_id {
            Some(id) => {
                let join = if self.config.done_url.contains('?') {
                    '&'
                } else {
                    '?'
                };
                format!(
                    "{}{}studentId={}",
                    self.config.done_url,
                    join,
                    urlencoding::encode(id)
                )
            }
            None => self.config.done_url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
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

    fn confirmation(config: ConfirmationConfig) -> (ConfirmationModel, Rc<Recorder>) {
        let recorder = Rc::new(Recorder::default());
        let model = ConfirmationModel::new(
            config,
            Rc::clone(&recorder) as Rc<dyn EventSink>,
            Rc::clone(&recorder) as Rc<dyn Navigator>,
        );
        (model, recorder)
    }

    #[test]
    fn dialog_visibility_round_trip() {
        let dialog = DialogModel::new();
        assert!(!dialog.is_visible());

        dialog.show();
        assert!(dialog.is_visible());

        dialog.hide();
        assert!(!dialog.is_visible());
    }

    #[test]
    fn dialog_dispose_hides_and_silences() {
        use std::cell::Cell;

        let dialog = DialogModel::new();
        dialog.show();

        let fired = Rc::new(Cell::new(0u32));
        let fired_clone = Rc::clone(&fired);
        dialog
            .visible()
            .observe(move |_, _| fired_clone.set(fired_clone.get() + 1));

        dialog.dispose();
        assert!(!dialog.is_visible());
        // The hide itself notified, then listeners were dropped.
        assert_eq!(fired.get(), 1);

        dialog.show();
        assert!(!dialog.is_visible());

        // Second dispose is a no-op.
        dialog.dispose();
    }

    #[test]
    fn confirm_emits_navigates_and_hides() {
        let (model, recorder) =
            confirmation(ConfirmationConfig::new("https://example.org/done"));
        model.show();

        model.confirm();
        assert_eq!(*recorder.events.borrow(), vec!["done.confirmed"]);
        assert_eq!(*recorder.urls.borrow(), vec!["https://example.org/done"]);
        assert!(!model.dialog().is_visible());
    }

    #[test]
    fn deny_hides_without_side_effects() {
        let (model, recorder) =
            confirmation(ConfirmationConfig::new("https://example.org/done"));
        model.show();

        model.deny();
        assert!(recorder.events.borrow().is_empty());
        assert!(recorder.urls.borrow().is_empty());
        assert!(!model.dialog().is_visible());
    }

    #[test]
    fn done_url_joins_with_question_mark_when_no_query() {
        let (model, _) = confirmation(
            ConfirmationConfig::new("https://example.org/done").with_student_id("ada"),
        );
        assert_eq!(model.done_url(), "https://example.org/done?studentId=ada");
    }

    #[test]
    fn done_url_joins_with_ampersand_when_query_present() {
        let (model, _) = confirmation(
            ConfirmationConfig::new("https://example.org/done?lab=7").with_student_id("ada"),
        );
        assert_eq!(
            model.done_url(),
            "https://example.org/done?lab=7&studentId=ada"
        );
    }

    #[test]
    fn student_id_is_url_encoded() {
        let (model, _) = confirmation(
            ConfirmationConfig::new("https://example.org/done").with_student_id("ada lovelace"),
        );
        assert_eq!(
            model.done_url(),
            "https://example.org/done?studentId=ada%20lovelace"
        );
    }

    #[test]
    fn custom_event_name_is_emitted() {
        let (model, recorder) = confirmation(
            ConfirmationConfig::new("https://example.org/done").with_event_name("lab.finished"),
        );
        model.confirm();
        assert_eq!(*recorder.events.borrow(), vec!["lab.finished"]);
    }

    #[test]
    fn disposed_confirmation_does_nothing() {
        let (model, recorder) =
            confirmation(ConfirmationConfig::new("https://example.org/done"));
        model.dispose();

        model.confirm();
        assert!(recorder.events.borrow().is_empty());
        assert!(recorder.urls.borrow().is_empty());
    }
}
