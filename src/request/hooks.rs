//! Lifecycle notification hooks attached to a request.

use crate::engine::TransferResult;

use std::fmt;
use std::sync::Arc;

/// Callback type for notifications without a payload.
pub type NotifyCallback = Arc<dyn Fn() + Send + Sync>;

/// Callback type for byte-count notifications.
pub type LengthCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Callback type for the terminal result.
pub type FinishCallback = Arc<dyn Fn(&TransferResult) + Send + Sync>;

/// The set of hooks a request carries. Every hook is optional.
///
/// Hooks run on whatever task calls them and must return promptly: the
/// engine does not make progress while one is running.
#[derive(Clone, Default)]
pub struct RequestHooks {
    pub(crate) on_create: Option<NotifyCallback>,
    pub(crate) on_dispatched: Option<NotifyCallback>,
    pub(crate) on_read_length: Option<LengthCallback>,
    pub(crate) on_loading: Option<LengthCallback>,
    pub(crate) on_finish: Option<FinishCallback>,
    pub(crate) on_canceled: Option<NotifyCallback>,
}

impl RequestHooks {
    pub(crate) fn created(&self) {
        if let Some(ref callback) = self.on_create {
            callback();
        }
    }

    pub(crate) fn dispatched(&self) {
        if let Some(ref callback) = self.on_dispatched {
            callback();
        }
    }

    /// Fire the `on_read_length` hook.
    pub fn read_length(&self, total_bytes: u64) {
        if let Some(ref callback) = self.on_read_length {
            callback(total_bytes);
        }
    }

    /// Fire the `on_loading` hook.
    pub fn loading(&self, downloaded_bytes: u64) {
        if let Some(ref callback) = self.on_loading {
            callback(downloaded_bytes);
        }
    }

    pub(crate) fn finished(&self, result: &TransferResult) {
        if let Some(ref callback) = self.on_finish {
            callback(result);
        }
    }

    pub(crate) fn canceled(&self) {
        if let Some(ref callback) = self.on_canceled {
            callback();
        }
    }
}

impl fmt::Debug for RequestHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestHooks")
            .field("on_create", &self.on_create.is_some())
            .field("on_dispatched", &self.on_dispatched.is_some())
            .field("on_read_length", &self.on_read_length.is_some())
            .field("on_loading", &self.on_loading.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .field("on_canceled", &self.on_canceled.is_some())
            .finish()
    }
}
