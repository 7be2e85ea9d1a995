//! Underlying causes of a failed attempt.

use super::kind::FailureKind;

use reqwest::StatusCode;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Everything that can interrupt a single transfer attempt.
///
/// This is an open set of causes. Callers that need to act on a failure
/// should look at the [`FailureKind`] it classifies into instead.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The transport refused the URL before sending anything.
    #[error("Malformed URL: {0}")]
    BadUrl(String),

    /// The host name could not be resolved.
    #[error("Unknown host: {0}")]
    UnknownHost(String),

    /// Error raised by the HTTP client while sending the request.
    #[error("HTTP transport error")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Unexpected HTTP status {0}")]
    Status(StatusCode),

    /// Reading the response body failed.
    #[error("Stream read error")]
    Stream {
        #[source]
        source: io::Error,
    },

    /// Creating, seeking or writing the target file failed.
    #[error("Local I/O error")]
    LocalIo {
        #[source]
        source: io::Error,
    },

    /// The server response cannot be used for a transfer.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Error raised by a client middleware, typically after the send
    /// retries ran out.
    #[error("HTTP middleware error: {source}")]
    Middleware {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

}

impl TransferError {
    /// Wrap an error coming from the response body.
    pub fn stream(source: io::Error) -> Self {
        TransferError::Stream { source }
    }

    /// Wrap an error coming from the target file.
    pub fn local_io(source: io::Error) -> Self {
        TransferError::LocalIo { source }
    }
}

impl From<reqwest_middleware::Error> for TransferError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(source) => TransferError::Http { source },
            reqwest_middleware::Error::Middleware(e) => TransferError::Middleware { source: e.into() },
        }
    }
}

/// A classified failure: the kind decides the policy, the cause explains it.
#[derive(Debug, Clone)]
pub struct TransferFailure {
    kind: FailureKind,
    cause: Arc<TransferError>,
}

impl TransferFailure {
    /// Classify `cause` and wrap it.
    pub fn new(cause: TransferError) -> Self {
        Self {
            kind: FailureKind::classify(&cause),
            cause: Arc::new(cause),
        }
    }

    /// The failure kind.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The underlying cause.
    pub fn cause(&self) -> &TransferError {
        &self.cause
    }
}

impl From<TransferError> for TransferFailure {
    fn from(cause: TransferError) -> Self {
        TransferFailure::new(cause)
    }
}

impl fmt::Display for TransferFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.cause)
    }
}

impl std::error::Error for TransferFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}
