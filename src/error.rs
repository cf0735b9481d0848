//! Domain error types
//!
//! Absence of a window class during resolution is not an error and never shows
//! up here; only conditions a caller can act on are surfaced.

use thiserror::Error;

use crate::platform::WindowHandle;

/// Errors raised while switching the capture target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// The handle no longer refers to a live window; prior state is kept.
    #[error("window {} is no longer available", .0.stable_id())]
    WindowGone(WindowHandle),

    /// A picker query found no window under the given point.
    #[error("no window at screen point ({x}, {y})")]
    NoWindowAtPoint { x: i32, y: i32 },
}

/// Errors raised by profile element management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("profile already holds the maximum of {0} layout elements")]
    TooManyElements(usize),

    #[error("a profile must keep at least one layout element")]
    LastElement,

    #[error("layout element index {index} out of range (count {count})")]
    ElementOutOfRange { index: usize, count: usize },

    #[error(transparent)]
    Target(#[from] TargetError),
}
