//! Engine configuration and defaults.

use std::time::Duration;

/// Pause before a silent retry after a lost connection.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(1000);

/// Size of the buffer each read from the response fills.
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Configuration structure for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pause before restarting an attempt after a network failure.
    pub retry_interval: Duration,
    /// Size of the copy buffer.
    pub buffer_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            retry_interval: DEFAULT_RETRY_INTERVAL,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}
