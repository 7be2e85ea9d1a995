//! Builder for [`TransferRequest`]s that carry hooks or non-default options.
//!
//! # Examples
//!
//! ```rust
//! use resumable::request::TransferRequestBuilder;
//! use std::time::Duration;
//!
//! let request = TransferRequestBuilder::new("https://example.com/big.iso", "big.iso")
//!     .sequence(3)
//!     .timeout(Duration::from_secs(30))
//!     .on_read_length(|total| println!("remote size: {total}"))
//!     .on_canceled(|| println!("cancelled"))
//!     .build()?;
//! assert_eq!(request.sequence(), 3);
//! # Ok::<(), resumable::Error>(())
//! ```

use super::hooks::RequestHooks;
use super::request::{TransferRequest, DEFAULT_PROGRESS_INTERVAL};
use crate::engine::TransferResult;
use crate::error::Result;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// A builder used to create a [`TransferRequest`].
pub struct TransferRequestBuilder {
    url: String,
    target_file: PathBuf,
    start_offset: u64,
    sequence: i32,
    timeout: Duration,
    progress_interval: Duration,
    hooks: RequestHooks,
}

impl TransferRequestBuilder {
    /// Creates a builder with the default options.
    pub fn new(url: &str, target_file: impl Into<PathBuf>) -> Self {
        Self {
            url: url.to_string(),
            target_file: target_file.into(),
            start_offset: 0,
            sequence: 0,
            timeout: Duration::ZERO,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            hooks: RequestHooks::default(),
        }
    }

    /// Resume from this byte offset.
    pub fn start_offset(mut self, start_offset: u64) -> Self {
        self.start_offset = start_offset;
        self
    }

    /// Set the ordering key.
    pub fn sequence(mut self, sequence: i32) -> Self {
        self.sequence = sequence;
        self
    }

    /// Set the timeout handed to the network performer.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the minimum delay between two loading notifications.
    pub fn progress_interval(mut self, progress_interval: Duration) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    /// Called once, when the request is built.
    pub fn on_create<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hooks.on_create = Some(Arc::new(callback));
        self
    }

    /// Called when a scheduler hands the request to an engine.
    pub fn on_dispatched<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hooks.on_dispatched = Some(Arc::new(callback));
        self
    }

    /// Called when the remote length becomes known.
    pub fn on_read_length<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.hooks.on_read_length = Some(Arc::new(callback));
        self
    }

    /// Called with the bytes received by the current attempt, at most once per
    /// progress interval.
    pub fn on_loading<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.hooks.on_loading = Some(Arc::new(callback));
        self
    }

    /// Called when the transfer succeeds or fails.
    pub fn on_finish<F>(mut self, callback: F) -> Self
    where
        F: Fn(&TransferResult) + Send + Sync + 'static,
    {
        self.hooks.on_finish = Some(Arc::new(callback));
        self
    }

    /// Called when the engine stops because the request was cancelled.
    pub fn on_canceled<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hooks.on_canceled = Some(Arc::new(callback));
        self
    }

    /// Create the [`TransferRequest`] and fire its `on_create` hook.
    pub fn build(self) -> Result<TransferRequest> {
        let request = TransferRequest::with_offset(&self.url, self.target_file, self.start_offset)?
            .with_options(
                self.sequence,
                self.timeout,
                self.progress_interval,
                self.hooks,
            );
        request.hooks().created();
        Ok(request)
    }
}
