//! Error taxonomy for the store layer.
//!
//! Preference-file corruption is deliberately absent: it is recovered
//! internally to an empty default and never surfaced to callers.

use thiserror::Error;

/// Failures surfaced by the stores and the repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be opened. Fatal at construction;
    /// there is no recovery path.
    #[error("storage unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),

    /// A single write did not durably commit. Surfaced to the caller of
    /// that operation; not retried automatically.
    #[error("write failed: {0}")]
    WriteFailed(#[source] anyhow::Error),
}

impl StoreError {
    pub fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        StoreError::Unavailable(err.into())
    }

    pub fn write_failed(err: impl Into<anyhow::Error>) -> Self {
        StoreError::WriteFailed(err.into())
    }
}
