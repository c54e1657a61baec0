#![forbid(unsafe_code)]

//! Canonical pointer event type.
//!
//! The host's input dispatch produces these four events per interactive
//! element; hit-testing and pointer capture live on that side of the
//! boundary. The core only consumes the resulting semantic stream.

/// A pointer event delivered to one interactive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    /// The pointer moved onto the element.
    Enter,
    /// The pointer moved off the element.
    Leave,
    /// The primary button was pressed while over the element.
    Down,
    /// The primary button was released. May arrive without a matching
    /// `Down` when pointer capture is lost externally.
    Up,
}
