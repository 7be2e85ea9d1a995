//! Error handling for the resumable library.
//!
//! This module provides the crate-level [`Error`] returned by constructors and
//! by [`TransferEngine::work`](crate::engine::TransferEngine::work). Failures
//! that happen *inside* a transfer attempt are not errors at this level: they
//! are classified into a [`FailureKind`](crate::failure::FailureKind) and
//! reported through the transfer result.

use thiserror::Error;

/// Errors that can happen when using resumable.
#[derive(Error, Debug)]
pub enum Error {
    /// The URL given to a request is empty or cannot be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The task driving a transfer was interrupted.
    ///
    /// No transfer result is produced when this is returned: the attempt in
    /// flight was torn down and the request keeps whatever offset it had
    /// reached.
    #[error("Transfer interrupted")]
    Interrupted,

    /// Error from the Reqwest library.
    ///
    /// Returned when building the HTTP client fails.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

/// Result type alias for operations that can fail with a resumable error.
pub type Result<T> = std::result::Result<T, Error>;
