//! Typed failures of the shift engines.
//!
//! The matching, diff and script engines report failures through
//! [`ShiftError`] so callers can tell a recoverable weekday issue from a
//! store outage or an exhausted id allocator. Application layers (commands,
//! configuration, the SQLite store) wrap these into `anyhow::Error` with `?`.

use thiserror::Error;

/// Failure taxonomy shared by the shift engines and their collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShiftError {
    /// The text does not name any known weekday.
    ///
    /// Recoverable: ordering code logs a warning and sorts the entry last.
    #[error("unrecognized weekday: '{0}'")]
    UnrecognizedWeekday(String),

    /// The shift store could not answer a query.
    #[error("shift repository error: {0}")]
    Repository(String),

    /// A schedule violates a model invariant (non-positive duration,
    /// duplicate weekday, missing identifier for a persisted row).
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// The identifier allocator is exhausted or unreachable.
    #[error("identifier allocation failed: {0}")]
    Allocation(String),

    /// A corpus scan was aborted through its cancellation flag.
    #[error("operation cancelled")]
    Cancelled,
}

impl From<rusqlite::Error> for ShiftError {
    fn from(error: rusqlite::Error) -> Self {
        ShiftError::Repository(error.to_string())
    }
}
