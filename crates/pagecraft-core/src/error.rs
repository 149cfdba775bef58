//! Error taxonomy for editor operations.
//!
//! None of these are fatal. The plain gesture entry points on
//! [`Editor`](crate::Editor) log and discard them; the `try_*` forms hand them
//! back to hosts that want to inspect the reason.

use crate::element::ElementId;
use thiserror::Error;

/// Why an editor operation was ignored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),
    #[error("Invalid geometry for {id}: {width}x{height}")]
    InvalidGeometry { id: ElementId, width: f64, height: f64 },
    #[error("Mode violation: {0}")]
    ModeViolation(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("No gesture in progress")]
    NotActive,
}

impl EditorError {
    /// Log this error at the level its kind deserves.
    pub fn log(&self, operation: &str) {
        match self {
            EditorError::UnknownElement(_) => log::warn!("{operation} ignored: {self}"),
            EditorError::InvalidGeometry { .. }
            | EditorError::ModeViolation(_)
            | EditorError::InvalidInput(_) => {
                log::debug!("{operation} ignored: {self}")
            }
            EditorError::NotActive => log::trace!("{operation} ignored: {self}"),
        }
    }
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
