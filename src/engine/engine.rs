//! The transfer loop.

use super::builder::EngineBuilder;
use super::config::EngineConfig;
use super::interrupt::Interrupter;
use super::outcome::{Outcome, TransferResult};
use super::target::TargetFile;
use crate::error::{Error, Result};
use crate::failure::{TransferError, TransferFailure};
use crate::network::{NetworkPerformer, NetworkResponse, ResponseGuard};
use crate::progress::ProgressDelivery;
use crate::request::{CancelHandle, TransferRequest};

use std::fmt;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

/// How one attempt ended, short of a failure.
enum AttemptEnd {
    Complete,
    Cancelled,
}

/// Why one attempt stopped early.
enum AttemptError {
    Interrupted,
    Failed(TransferError),
}

impl From<TransferError> for AttemptError {
    fn from(err: TransferError) -> Self {
        AttemptError::Failed(err)
    }
}

/// Drives one [`TransferRequest`] to completion.
///
/// The engine owns the request while it works. Cancel it through
/// [`cancel_handle`](TransferEngine::cancel_handle), interrupt the task
/// through [`interrupter`](TransferEngine::interrupter), and take the request
/// back with [`into_request`](TransferEngine::into_request).
pub struct TransferEngine<P, D> {
    performer: P,
    delivery: D,
    request: TransferRequest,
    config: EngineConfig,
    interrupter: Interrupter,
    retries: u32,
}

impl<P, D> fmt::Debug for TransferEngine<P, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferEngine")
            .field("request", &self.request)
            .field("config", &self.config)
            .field("retries", &self.retries)
            .finish_non_exhaustive()
    }
}

impl<P, D> TransferEngine<P, D>
where
    P: NetworkPerformer,
    D: ProgressDelivery,
{
    /// Creates an engine with the default configuration.
    pub fn new(performer: P, delivery: D, request: TransferRequest) -> Self {
        Self::with_config(
            performer,
            delivery,
            request,
            EngineConfig::default(),
            Interrupter::new(),
        )
    }

    /// Creates a builder to configure the engine.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn with_config(
        performer: P,
        delivery: D,
        request: TransferRequest,
        mut config: EngineConfig,
        interrupter: Interrupter,
    ) -> Self {
        config.buffer_size = config.buffer_size.max(1);
        Self {
            performer,
            delivery,
            request,
            config,
            interrupter,
            retries: 0,
        }
    }

    /// The request being transferred.
    pub fn request(&self) -> &TransferRequest {
        &self.request
    }

    /// Give the request back.
    pub fn into_request(self) -> TransferRequest {
        self.request
    }

    /// The progress delivery.
    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A handle cancelling the request.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.request.cancel_handle()
    }

    /// A handle interrupting this engine.
    pub fn interrupter(&self) -> Interrupter {
        self.interrupter.clone()
    }

    /// Number of silent retries performed so far.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Run the transfer.
    ///
    /// Lost connections and unresolved hosts are retried from the last
    /// written byte after [`EngineConfig::retry_interval`]. Any other failure
    /// ends the transfer with [`TransferResult::Failure`]. Returns
    /// [`Outcome::Cancelled`] once a cancellation is observed and
    /// [`Error::Interrupted`] when the [`Interrupter`] fires.
    ///
    /// A request that already holds a result is not transferred again.
    pub async fn work(&mut self) -> Result<Outcome> {
        if let Some(result) = self.request.result() {
            warn!(
                "Request for {} already finished, not transferring again",
                self.request.source_url()
            );
            return Ok(Outcome::Finished(result.clone()));
        }

        loop {
            if self.request.is_cancelled() {
                return Ok(self.cancelled());
            }

            let cause = match self.attempt().await {
                Ok(AttemptEnd::Complete) => return Ok(self.finish(TransferResult::Success)),
                Ok(AttemptEnd::Cancelled) => return Ok(self.cancelled()),
                Err(AttemptError::Interrupted) => {
                    debug!("Transfer of {} interrupted", self.request.effective_url());
                    return Err(Error::Interrupted);
                }
                Err(AttemptError::Failed(cause)) => cause,
            };

            let failure = TransferFailure::new(cause);
            if !failure.kind().is_retryable() {
                debug!("Transfer of {} failed: {}", self.request.effective_url(), failure);
                return Ok(self.finish(TransferResult::Failure(failure)));
            }

            let resume_at = self.request.current_bytes();
            self.request.set_start_offset(resume_at);
            self.request.set_downloaded_bytes(0);
            self.retries += 1;
            info!(
                "{} while transferring {}, retrying from byte {} in {:?}",
                failure,
                self.request.effective_url(),
                resume_at,
                self.config.retry_interval
            );

            tokio::select! {
                biased;
                _ = self.interrupter.interrupted() => return Err(Error::Interrupted),
                _ = tokio::time::sleep(self.config.retry_interval) => {}
            }
        }
    }

    /// One pass through request, validation and streaming.
    async fn attempt(&mut self) -> std::result::Result<AttemptEnd, AttemptError> {
        let Self {
            performer,
            delivery,
            request,
            config,
            interrupter,
            ..
        } = self;

        let response = tokio::select! {
            biased;
            _ = interrupter.interrupted() => return Err(AttemptError::Interrupted),
            response = performer.perform(request) => response?,
        };
        let mut response = ResponseGuard::new(response);
        if request.is_cancelled() {
            return Ok(AttemptEnd::Cancelled);
        }

        validate(request, &*response)?;
        let total_length = response.total_length();
        request.set_total_bytes(total_length);
        delivery.post_total_length(request, total_length);

        // A server ignoring the range sends the whole resource again.
        let mut skip = if response.supports_range() {
            0
        } else {
            request.start_offset()
        };
        if skip > 0 {
            debug!("Server ignored the range, skipping {} bytes", skip);
        }

        let mut target = TargetFile::open(request.target_file(), total_length, request.start_offset())
            .await
            .map_err(TransferError::local_io)?;

        debug!("Retrieving chunks...");
        let mut buffer = vec![0u8; config.buffer_size];
        let streamed = loop {
            let read = tokio::select! {
                biased;
                _ = interrupter.interrupted() => break Err(AttemptError::Interrupted),
                read = response.content_stream().read(&mut buffer) => read,
            };
            let read = match read {
                Ok(0) => match target.finish().await {
                    Ok(()) => break Ok(AttemptEnd::Complete),
                    Err(e) => break Err(TransferError::local_io(e).into()),
                },
                Ok(read) => read,
                Err(e) => break Err(TransferError::stream(e).into()),
            };

            let mut chunk = &buffer[..read];
            if skip > 0 {
                let skipped = chunk.len().min(usize::try_from(skip).unwrap_or(usize::MAX));
                skip -= skipped as u64;
                chunk = &chunk[skipped..];
            }

            if !chunk.is_empty() {
                let written = request.current_bytes() + chunk.len() as u64;
                if written > request.total_bytes() {
                    break Err(TransferError::Protocol(format!(
                        "server sent more than the declared {} bytes",
                        request.total_bytes()
                    ))
                    .into());
                }
                if let Err(e) = target.write_all(chunk).await {
                    break Err(TransferError::local_io(e).into());
                }
                let downloaded = request.downloaded_bytes() + chunk.len() as u64;
                request.set_downloaded_bytes(downloaded);
                delivery.post_loading(request, downloaded);
            }

            if interrupter.is_interrupted() {
                break Err(AttemptError::Interrupted);
            }
            if request.is_cancelled() {
                break Ok(AttemptEnd::Cancelled);
            }
        };

        drop(response);
        target.close(request.target_file()).await;

        if let Ok(AttemptEnd::Complete) = streamed {
            if request.current_bytes() < request.total_bytes() {
                warn!(
                    "Stream for {} ended at byte {} of {}",
                    request.effective_url(),
                    request.current_bytes(),
                    request.total_bytes()
                );
            }
        }
        streamed
    }

    fn finish(&mut self, result: TransferResult) -> Outcome {
        self.request.set_result(result.clone());
        self.request.hooks().finished(&result);
        Outcome::Finished(result)
    }

    fn cancelled(&self) -> Outcome {
        debug!("Transfer of {} cancelled", self.request.effective_url());
        self.request.hooks().canceled();
        Outcome::Cancelled
    }
}

/// Zero-length transfers are not supported.
fn validate<R: NetworkResponse>(
    request: &TransferRequest,
    response: &R,
) -> std::result::Result<(), TransferError> {
    if response.content_length() == 0 || response.total_length() == 0 {
        return Err(TransferError::Protocol(format!(
            "url ({}) does not return a content length",
            request.source_url()
        )));
    }
    Ok(())
}
