//! Domain-level error types.

use thiserror::Error;

/// Outcomes of draft operations the caller is expected to handle.
///
/// `Busy`, `NotFound` and `Archived` are normal results of contention and
/// lookup, not faults. `Backend` is the converted form of a storage fault:
/// the full detail has already been logged server-side and only a short
/// user-safe diagnostic travels outward.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("The draft store is currently busy, please try again")]
    Busy,

    #[error("No draft exists with id {0}")]
    NotFound(String),

    #[error("Draft {0} has been archived")]
    Archived(String),

    #[error("Storage error: {0}")]
    Backend(String),
}
