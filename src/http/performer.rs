//! reqwest-backed network performer.

use super::client::{create_http_client, HttpClientConfig};
use super::response::HttpResponse;
use crate::error::Result;
use crate::failure::TransferError;
use crate::network::NetworkPerformer;
use crate::request::TransferRequest;

use reqwest::{header::RANGE, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use tracing::debug;

/// Sends transfer requests over HTTP(S).
///
/// A request resuming at a nonzero offset is sent with
/// `Range: bytes=<offset>-`. Redirects are followed by reqwest and the final
/// URL is recorded on the request so later attempts skip the hop.
#[derive(Clone)]
pub struct HttpPerformer {
    client: ClientWithMiddleware,
}

impl HttpPerformer {
    /// Creates a performer with a client built from `config`.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config)?,
        })
    }

    /// Creates a performer around an existing client.
    pub fn with_client(client: ClientWithMiddleware) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }
}

impl fmt::Debug for HttpPerformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPerformer").finish_non_exhaustive()
    }
}

impl NetworkPerformer for HttpPerformer {
    type Response = HttpResponse;

    async fn perform(
        &self,
        request: &mut TransferRequest,
    ) -> std::result::Result<HttpResponse, TransferError> {
        let url = Url::parse(request.effective_url()).map_err(|e| {
            TransferError::BadUrl(format!("{}: {}", request.effective_url(), e))
        })?;
        let start_offset = request.start_offset();

        debug!("Fetching {} from byte {}", url, start_offset);
        let mut req = self.client.get(url.clone());
        if start_offset > 0 {
            req = req.header(RANGE, format!("bytes={}-", start_offset));
        }
        if !request.timeout().is_zero() {
            req = req.timeout(request.timeout());
        }

        let res = req.send().await?;
        if res.url() != &url {
            debug!("Redirected from {} to {}", url, res.url());
            request.set_redirect_url(res.url().as_str());
        }

        let status = res.status();
        if !status.is_success() {
            return Err(TransferError::Status(status));
        }

        Ok(HttpResponse::from_response(res, start_offset))
    }
}
