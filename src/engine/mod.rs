//! The transfer engine.
//!
//! A [`TransferEngine`] takes one [`TransferRequest`](crate::request::TransferRequest),
//! a [`NetworkPerformer`](crate::network::NetworkPerformer) and a
//! [`ProgressDelivery`](crate::progress::ProgressDelivery), and streams the
//! remote bytes into the target file. Each attempt goes through
//! request → validation → streaming; a lost connection restarts the attempt
//! from the last written byte.
//!
//! - `engine` - the transfer loop
//! - `builder` - [`EngineBuilder`] for non-default configuration
//! - `config` - [`EngineConfig`] and defaults
//! - `outcome` - [`Outcome`] and [`TransferResult`]
//! - `interrupt` - [`Interrupter`], tearing down a running transfer
//!
//! # Examples
//!
//! ```rust,no_run
//! use resumable::engine::{Outcome, TransferEngine};
//! use resumable::http::{HttpClientConfig, HttpPerformer};
//! use resumable::progress::HookDelivery;
//! use resumable::request::TransferRequest;
//!
//! # async fn example() -> Result<(), resumable::Error> {
//! let request = TransferRequest::builder("https://example.com/big.iso", "big.iso")
//!     .on_loading(|bytes| println!("{bytes} bytes"))
//!     .build()?;
//! let performer = HttpPerformer::new(HttpClientConfig::default())?;
//! let mut engine = TransferEngine::new(performer, HookDelivery::new(), request);
//!
//! match engine.work().await? {
//!     Outcome::Finished(result) if result.is_success() => println!("done"),
//!     Outcome::Finished(result) => println!("failed: {:?}", result.kind()),
//!     Outcome::Cancelled => println!("cancelled"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod interrupt;
pub mod outcome;
pub(crate) mod target;

pub use builder::EngineBuilder;
pub use config::{EngineConfig, DEFAULT_BUFFER_SIZE, DEFAULT_RETRY_INTERVAL};
pub use engine::TransferEngine;
pub use interrupt::Interrupter;
pub use outcome::{Outcome, TransferResult};
