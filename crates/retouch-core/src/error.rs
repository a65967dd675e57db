//! Error types for the edit-state engine.
//!
//! None of these are fatal. Session operations report them as a `false`
//! result and log the message; the host UI decides whether to surface it.

use thiserror::Error;

/// Error types for edit-state operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// An operation was called outside the mode it is valid in.
    #[error("{operation} is not valid while {mode}")]
    InvalidTransition {
        operation: &'static str,
        mode: &'static str,
    },

    /// A rectangle would become empty, inverted or leave the unit square.
    #[error("Degenerate crop geometry: ({x}, {y}, {width}, {height})")]
    DegenerateGeometry {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// A session with this key is already registered in the arena.
    #[error("Session already exists: {0}")]
    SessionExists(String),

    /// The animation search backend failed.
    #[error("Animation search failed: {0}")]
    Search(String),
}
