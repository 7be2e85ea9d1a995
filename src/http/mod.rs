//! HTTP implementation of the network capability.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`performer`] - [`HttpPerformer`], the reqwest-backed [`NetworkPerformer`](crate::network::NetworkPerformer)
//! - [`response`] - [`HttpResponse`], a streamed reqwest response
//!
//! # Examples
//!
//! ```rust
//! use resumable::http::{HttpClientConfig, HttpPerformer};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "MyApp/1.0".parse()?);
//!
//! let performer = HttpPerformer::new(HttpClientConfig {
//!     retries: 2,
//!     proxy: None,
//!     headers: Some(headers),
//!     connect_timeout: None,
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod performer;
pub mod response;

pub use client::{create_http_client, HttpClientConfig};
pub use performer::HttpPerformer;
pub use response::HttpResponse;
