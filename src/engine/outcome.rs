//! What a finished `work()` call reports.

use crate::failure::{FailureKind, TransferFailure};

/// Terminal result of a transfer that ran to the end.
#[derive(Debug, Clone)]
pub enum TransferResult {
    /// Every byte up to the end of the stream was written.
    Success,
    /// The transfer stopped on a failure that is not retried silently.
    Failure(TransferFailure),
}

impl TransferResult {
    /// Whether the transfer succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, TransferResult::Success)
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&TransferFailure> {
        match self {
            TransferResult::Success => None,
            TransferResult::Failure(failure) => Some(failure),
        }
    }

    /// The failure kind, if any.
    pub fn kind(&self) -> Option<FailureKind> {
        self.failure().map(TransferFailure::kind)
    }
}

/// Return value of [`TransferEngine::work`](super::TransferEngine::work).
///
/// Cancellation is neither a success nor a failure: no result is recorded on
/// the request.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The transfer reached a terminal result.
    Finished(TransferResult),
    /// The request was cancelled before the transfer finished.
    Cancelled,
}

impl Outcome {
    /// Whether the transfer was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// Whether the transfer finished successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Finished(TransferResult::Success))
    }

    /// The terminal result, unless the transfer was cancelled.
    pub fn result(&self) -> Option<&TransferResult> {
        match self {
            Outcome::Finished(result) => Some(result),
            Outcome::Cancelled => None,
        }
    }
}
