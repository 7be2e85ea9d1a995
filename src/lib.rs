//! Resumable is a crate for transferring a single remote file to disk in a
//! way that survives flaky networks: lost connections are retried silently
//! from the last written byte, progress is reported at a bounded rate, and a
//! transfer can be cancelled cooperatively or interrupted outright.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resumable::{HookDelivery, HttpClientConfig, HttpPerformer, TransferEngine, TransferRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), resumable::Error> {
//! let request = TransferRequest::new(
//!     "https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip",
//!     "output/reqwest.zip",
//! )?;
//! let performer = HttpPerformer::new(HttpClientConfig::default())?;
//! let mut engine = TransferEngine::new(performer, HookDelivery::new(), request);
//! let outcome = engine.work().await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`request`] - The [`TransferRequest`] data model and its hooks
//! - [`engine`] - The [`TransferEngine`] transfer loop and its outcomes
//! - [`failure`] - Failure causes and their classification into [`FailureKind`]s
//! - [`network`] - The injected network capability traits
//! - [`http`] - The reqwest-backed network performer
//! - [`progress`] - Progress delivery: hooks and progress bars
//! - [`error`] - Crate-level [`Error`]
//! - [`utils`] - Shared utility functions

pub mod engine;
pub mod error;
pub mod failure;
pub mod http;
pub mod network;
pub mod progress;
pub mod request;
pub mod utils;

pub use engine::{EngineBuilder, EngineConfig, Interrupter, Outcome, TransferEngine, TransferResult};
pub use error::{Error, Result};
pub use failure::{FailureKind, TransferError, TransferFailure};
pub use http::{create_http_client, HttpClientConfig, HttpPerformer, HttpResponse};
pub use network::{NetworkPerformer, NetworkResponse, ResponseGuard};
pub use progress::{HookDelivery, NoopDelivery, ProgressBarDelivery, ProgressBarOpts, ProgressDelivery};
pub use request::{CancelHandle, TransferRequest, TransferRequestBuilder};
