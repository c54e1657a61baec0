#![forbid(unsafe_code)]

//! Shell error taxonomy.
//!
//! Structural errors surface synchronously to the caller; expected input
//! anomalies (an orphan pointer release, a tap on a hidden home screen)
//! are absorbed where they occur and never reach this type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShellError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// A screen index outside `[0, count)`. Rejected rather than clamped:
    /// an out-of-range index is a caller defect, and clamping would hide it.
    #[error("screen index {index} out of range for {count} screens")]
    InvalidScreenIndex { index: usize, count: usize },

    /// A selector needs at least one screen.
    #[error("screen selector requires at least one screen")]
    NoScreens,
}

impl ShellError {
    #[must_use]
    pub fn invalid_index(index: usize, count: usize) -> Self {
        Self::InvalidScreenIndex { index, count }
    }
}
