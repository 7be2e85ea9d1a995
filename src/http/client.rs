//! HTTP client setup and middleware configuration.
//!
//! The client built here sends the requests of [`HttpPerformer`](super::HttpPerformer).
//! Its retry middleware only covers sending the request; failures while the
//! body streams are retried by the engine from the last written byte.
//!
//! # Examples
//!
//! ```rust,no_run
//! use resumable::http::{create_http_client, HttpClientConfig};
//! use reqwest::Proxy;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let proxy = Proxy::http("http://proxy.example.com:8080")?;
//! let config = HttpClientConfig {
//!     retries: 3,
//!     proxy: Some(proxy),
//!     headers: None,
//!     connect_timeout: None,
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Number of retries when sending a request fails transiently. `0`
    /// leaves the retry middleware out.
    pub retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// Limit on establishing a connection. Per-request timeouts come from
    /// [`TransferRequest::timeout`](crate::request::TransferRequest::timeout).
    pub connect_timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            proxy: None,
            headers: None,
            connect_timeout: None,
        }
    }
}

/// Creates an HTTP client with tracing and transient-retry middleware.
pub fn create_http_client(config: HttpClientConfig) -> Result<ClientWithMiddleware> {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.retries);

    let mut inner_client_builder = reqwest::Client::builder();

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        inner_client_builder = inner_client_builder.connect_timeout(connect_timeout);
    }

    let inner_client = inner_client_builder.build()?;

    // Build the client with middleware
    let mut client_builder = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default());

    // Retry requests that could not be sent.
    if config.retries > 0 {
        client_builder =
            client_builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
    }
    let client = client_builder.build();

    Ok(client)
}
