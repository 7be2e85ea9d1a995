//! The progress delivery capability and its hook-based implementation.

use crate::request::TransferRequest;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Receives progress events from the engine.
///
/// Both methods are fire-and-forget: they must not block. Any rate limiting
/// happens here, never in the engine.
pub trait ProgressDelivery: Send + Sync {
    /// The remote length became known.
    fn post_total_length(&self, request: &TransferRequest, total_bytes: u64);

    /// The current attempt has received `downloaded_bytes` bytes since its
    /// start offset.
    fn post_loading(&self, request: &TransferRequest, downloaded_bytes: u64);
}

impl<D: ProgressDelivery + ?Sized> ProgressDelivery for Arc<D> {
    fn post_total_length(&self, request: &TransferRequest, total_bytes: u64) {
        (**self).post_total_length(request, total_bytes)
    }

    fn post_loading(&self, request: &TransferRequest, downloaded_bytes: u64) {
        (**self).post_loading(request, downloaded_bytes)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelivery;

impl ProgressDelivery for NoopDelivery {
    fn post_total_length(&self, _request: &TransferRequest, _total_bytes: u64) {}

    fn post_loading(&self, _request: &TransferRequest, _downloaded_bytes: u64) {}
}

/// Forwards events to the request's own hooks.
///
/// `on_read_length` fires on every length event. `on_loading` fires at most
/// once per [`TransferRequest::progress_interval`], except that the event
/// completing the file is always forwarded.
///
/// The interval is tracked per target file, so one delivery can be shared by
/// engines transferring different files.
#[derive(Debug, Default)]
pub struct HookDelivery {
    last_loading: Mutex<HashMap<PathBuf, Instant>>,
}

impl HookDelivery {
    /// Creates a delivery that has not forwarded anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn should_forward(&self, request: &TransferRequest) -> bool {
        let now = Instant::now();
        let complete = request.total_bytes() > 0 && request.current_bytes() >= request.total_bytes();
        let Ok(mut last_loading) = self.last_loading.lock() else {
            return true;
        };
        if complete {
            last_loading.remove(request.target_file());
            return true;
        }
        let due = match last_loading.get(request.target_file()) {
            None => true,
            Some(previous) => now.duration_since(*previous) >= request.progress_interval(),
        };
        if due {
            last_loading.insert(request.target_file().to_path_buf(), now);
        }
        due
    }
}

impl ProgressDelivery for HookDelivery {
    fn post_total_length(&self, request: &TransferRequest, total_bytes: u64) {
        request.hooks().read_length(total_bytes);
    }

    fn post_loading(&self, request: &TransferRequest, downloaded_bytes: u64) {
        if self.should_forward(request) {
            request.hooks().loading(downloaded_bytes);
        }
    }
}
