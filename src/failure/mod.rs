//! Failure classification for transfer attempts.
//!
//! Anything that goes wrong while an attempt is in flight is captured as a
//! [`TransferError`]. The engine never inspects those errors directly: it asks
//! [`FailureKind::classify`] for one of a closed set of kinds and decides from
//! the kind alone whether to retry silently or to stop and report.
//!
//! # Examples
//!
//! ```rust
//! use resumable::failure::{FailureKind, TransferError};
//!
//! let err = TransferError::Protocol("no content length".into());
//! let kind = FailureKind::classify(&err);
//! assert_eq!(kind, FailureKind::Protocol);
//! assert!(!kind.is_retryable());
//! ```

pub mod error;
pub mod kind;

pub use error::{TransferError, TransferFailure};
pub use kind::FailureKind;
