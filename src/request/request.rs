//! Core transfer request type.

use super::builder::TransferRequestBuilder;
use super::hooks::RequestHooks;
use crate::engine::TransferResult;
use crate::error::{Error, Result};

use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default minimum delay between two `on_loading` notifications.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(1000);

/// Shared cancellation flag of a [`TransferRequest`].
///
/// Clones observe the same flag. Once set it stays set.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Request cancellation. The engine notices it between chunks.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Represents one file to transfer.
///
/// Requests are ordered by their [`sequence`](TransferRequest::sequence)
/// only, which lets a scheduler keep them in a priority queue.
pub struct TransferRequest {
    sequence: i32,
    source_url: String,
    redirect_url: Option<String>,
    target_file: PathBuf,
    start_offset: u64,
    downloaded_bytes: u64,
    total_bytes: u64,
    timeout: Duration,
    progress_interval: Duration,
    cancel: CancelHandle,
    result: Option<TransferResult>,
    hooks: RequestHooks,
}

impl TransferRequest {
    /// Creates a request for a fresh transfer.
    ///
    /// Fails with [`Error::InvalidUrl`] when `url` is empty. The filesystem
    /// is not touched.
    pub fn new(url: &str, target_file: impl Into<PathBuf>) -> Result<Self> {
        Self::with_offset(url, target_file, 0)
    }

    /// Creates a request that resumes at `start_offset`.
    pub fn with_offset(url: &str, target_file: impl Into<PathBuf>, start_offset: u64) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(Error::InvalidUrl("the url can not be empty".into()));
        }
        Ok(Self {
            sequence: 0,
            source_url: url.to_string(),
            redirect_url: None,
            target_file: target_file.into(),
            start_offset,
            downloaded_bytes: 0,
            total_bytes: 0,
            timeout: Duration::ZERO,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            cancel: CancelHandle::default(),
            result: None,
            hooks: RequestHooks::default(),
        })
    }

    /// Creates a builder to configure hooks and options.
    pub fn builder(url: &str, target_file: impl Into<PathBuf>) -> TransferRequestBuilder {
        TransferRequestBuilder::new(url, target_file)
    }

    pub(crate) fn with_options(
        mut self,
        sequence: i32,
        timeout: Duration,
        progress_interval: Duration,
        hooks: RequestHooks,
    ) -> Self {
        self.sequence = sequence;
        self.timeout = timeout;
        self.progress_interval = progress_interval;
        self.hooks = hooks;
        self
    }

    /// Ordering key used by schedulers.
    pub fn sequence(&self) -> i32 {
        self.sequence
    }

    /// Set the ordering key.
    pub fn set_sequence(&mut self, sequence: i32) {
        self.sequence = sequence;
    }

    /// The URL the request was created with.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// The redirect target learned by the network performer, if any.
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Record a redirect target. Later attempts go there directly.
    pub fn set_redirect_url(&mut self, redirect_url: impl Into<String>) {
        self.redirect_url = Some(redirect_url.into());
    }

    /// The URL to request: the redirect if one is known, the source otherwise.
    pub fn effective_url(&self) -> &str {
        self.redirect_url.as_deref().unwrap_or(&self.source_url)
    }

    /// Destination of the transfer.
    pub fn target_file(&self) -> &Path {
        &self.target_file
    }

    /// Byte offset the current attempt started from.
    pub fn start_offset(&self) -> u64 {
        self.start_offset
    }

    pub(crate) fn set_start_offset(&mut self, start_offset: u64) {
        self.start_offset = start_offset;
    }

    /// Bytes received by the current attempt.
    pub fn downloaded_bytes(&self) -> u64 {
        self.downloaded_bytes
    }

    pub(crate) fn set_downloaded_bytes(&mut self, downloaded_bytes: u64) {
        self.downloaded_bytes = downloaded_bytes;
    }

    /// Bytes written to the target file so far, across attempts.
    pub fn current_bytes(&self) -> u64 {
        self.start_offset + self.downloaded_bytes
    }

    /// Declared length of the remote file, 0 until known.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub(crate) fn set_total_bytes(&mut self, total_bytes: u64) {
        self.total_bytes = total_bytes;
    }

    /// Timeout handed to the network performer. Zero means none.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Set the timeout handed to the network performer.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Minimum delay between two loading notifications.
    pub fn progress_interval(&self) -> Duration {
        self.progress_interval
    }

    /// Set the minimum delay between two loading notifications.
    pub fn set_progress_interval(&mut self, progress_interval: Duration) {
        self.progress_interval = progress_interval;
    }

    /// Cancel the request. It can not be reused afterwards.
    ///
    /// Cancellation is cooperative: the engine returns once the chunk or
    /// network call in flight completes.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the request was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A handle that can cancel the request from another task or thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Terminal result, once the engine has finished with this request.
    pub fn result(&self) -> Option<&TransferResult> {
        self.result.as_ref()
    }

    pub(crate) fn set_result(&mut self, result: TransferResult) {
        self.result = Some(result);
    }

    /// Notify the request that a scheduler handed it to an engine.
    pub fn dispatched(&self) {
        self.hooks.dispatched();
    }

    /// The notification hooks of this request.
    pub fn hooks(&self) -> &RequestHooks {
        &self.hooks
    }
}

impl fmt::Debug for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferRequest")
            .field("sequence", &self.sequence)
            .field("source_url", &self.source_url)
            .field("redirect_url", &self.redirect_url)
            .field("target_file", &self.target_file)
            .field("start_offset", &self.start_offset)
            .field("downloaded_bytes", &self.downloaded_bytes)
            .field("total_bytes", &self.total_bytes)
            .field("timeout", &self.timeout)
            .field("progress_interval", &self.progress_interval)
            .field("cancelled", &self.is_cancelled())
            .field("result", &self.result)
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl PartialEq for TransferRequest {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Eq for TransferRequest {}

impl PartialOrd for TransferRequest {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for TransferRequest {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.sequence.cmp(&other.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_is_rejected() {
        assert!(matches!(
            TransferRequest::new("", "out.bin"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            TransferRequest::new("   ", "out.bin"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_effective_url_prefers_redirect() {
        let mut request = TransferRequest::new("http://a.test/f", "f").unwrap();
        assert_eq!(request.effective_url(), "http://a.test/f");
        request.set_redirect_url("http://b.test/f");
        assert_eq!(request.effective_url(), "http://b.test/f");
        assert_eq!(request.source_url(), "http://a.test/f");
    }

    #[test]
    fn test_current_bytes_adds_offset_and_attempt() {
        let mut request = TransferRequest::with_offset("http://a.test/f", "f", 300).unwrap();
        request.set_downloaded_bytes(200);
        assert_eq!(request.current_bytes(), 500);
    }

    #[test]
    fn test_cancel_is_shared_and_sticky() {
        let request = TransferRequest::new("http://a.test/f", "f").unwrap();
        let handle = request.cancel_handle();
        assert!(!request.is_cancelled());
        handle.cancel();
        assert!(request.is_cancelled());
        request.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_ordering_uses_sequence_only() {
        let mut a = TransferRequest::new("http://a.test/1", "1").unwrap();
        let mut b = TransferRequest::new("http://a.test/2", "2").unwrap();
        a.set_sequence(5);
        b.set_sequence(2);
        assert!(b < a);
        b.set_sequence(5);
        assert_eq!(a.cmp(&b), CmpOrdering::Equal);
    }
}
