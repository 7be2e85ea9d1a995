//! Network capabilities injected into the engine.
//!
//! The engine does not know how bytes are fetched. It is handed a
//! [`NetworkPerformer`] that turns a [`TransferRequest`] into a
//! [`NetworkResponse`]: declared lengths plus a readable body. The
//! reqwest-backed implementation lives in [`crate::http`]; tests use scripted
//! doubles.

use crate::failure::TransferError;
use crate::request::TransferRequest;

use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::io::AsyncRead;

/// The answer to one network request.
pub trait NetworkResponse: Send {
    /// Full size of the remote resource.
    fn total_length(&self) -> u64;

    /// Size of the range actually being delivered.
    fn content_length(&self) -> u64;

    /// Whether the server honored the requested start offset.
    fn supports_range(&self) -> bool;

    /// The body bytes.
    fn content_stream(&mut self) -> &mut (dyn AsyncRead + Send + Unpin);

    /// Release transport resources. Safe to call more than once.
    fn disconnect(&mut self);
}

/// Turns a request into a response.
///
/// Implementations must start the body at `request.start_offset()` when they
/// report [`NetworkResponse::supports_range`], target
/// `request.effective_url()`, and may record a redirect on the request.
pub trait NetworkPerformer: Send + Sync {
    /// Response type produced by this performer.
    type Response: NetworkResponse;

    /// Send the request.
    fn perform(
        &self,
        request: &mut TransferRequest,
    ) -> impl Future<Output = Result<Self::Response, TransferError>> + Send;
}

impl<P: NetworkPerformer> NetworkPerformer for Arc<P> {
    type Response = P::Response;

    fn perform(
        &self,
        request: &mut TransferRequest,
    ) -> impl Future<Output = Result<Self::Response, TransferError>> + Send {
        (**self).perform(request)
    }
}

/// Owns a response for the duration of one attempt and disconnects it on
/// every exit path.
pub struct ResponseGuard<R: NetworkResponse> {
    response: R,
}

impl<R: NetworkResponse> ResponseGuard<R> {
    /// Take ownership of `response`.
    pub fn new(response: R) -> Self {
        Self { response }
    }
}

impl<R: NetworkResponse> Deref for ResponseGuard<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.response
    }
}

impl<R: NetworkResponse> DerefMut for ResponseGuard<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.response
    }
}

impl<R: NetworkResponse> Drop for ResponseGuard<R> {
    fn drop(&mut self) {
        self.response.disconnect();
    }
}
