//! Builder for [`TransferEngine`]s with non-default configuration.

use super::config::EngineConfig;
use super::engine::TransferEngine;
use super::interrupt::Interrupter;
use crate::network::NetworkPerformer;
use crate::progress::ProgressDelivery;
use crate::request::TransferRequest;

use std::time::Duration;

/// A builder used to create a [`TransferEngine`].
///
/// ```rust
/// use resumable::engine::EngineBuilder;
/// use std::time::Duration;
///
/// let builder = EngineBuilder::new()
///     .retry_interval(Duration::from_millis(250))
///     .buffer_size(64 * 1024);
/// assert_eq!(builder.config().buffer_size, 64 * 1024);
/// ```
#[derive(Debug, Default, Clone)]
pub struct EngineBuilder {
    config: EngineConfig,
    interrupter: Option<Interrupter>,
}

impl EngineBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        EngineBuilder::default()
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the pause before a silent retry.
    pub fn retry_interval(mut self, retry_interval: Duration) -> Self {
        self.config.retry_interval = retry_interval;
        self
    }

    /// Set the copy buffer size. Values below one byte are raised to one.
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.config.buffer_size = buffer_size.max(1);
        self
    }

    /// Share an existing interrupter instead of creating one.
    pub fn interrupter(mut self, interrupter: Interrupter) -> Self {
        self.interrupter = Some(interrupter);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create the [`TransferEngine`] for `request`.
    pub fn build<P, D>(self, performer: P, delivery: D, request: TransferRequest) -> TransferEngine<P, D>
    where
        P: NetworkPerformer,
        D: ProgressDelivery,
    {
        TransferEngine::with_config(
            performer,
            delivery,
            request,
            self.config,
            self.interrupter.unwrap_or_default(),
        )
    }
}
