//! Streamed reqwest response.

use crate::network::NetworkResponse;
use crate::utils::content_length::{content_length, total_length};

use futures::TryStreamExt;
use reqwest::{Response, StatusCode};
use std::io;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

type Body = Box<dyn AsyncRead + Send + Unpin>;

/// A reqwest response whose body is read as a byte stream.
pub struct HttpResponse {
    total_length: u64,
    content_length: u64,
    supports_range: bool,
    body: Body,
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("total_length", &self.total_length)
            .field("content_length", &self.content_length)
            .field("supports_range", &self.supports_range)
            .finish_non_exhaustive()
    }
}

impl HttpResponse {
    /// Wrap a response received for a request that started at `start_offset`.
    pub fn from_response(response: Response, start_offset: u64) -> Self {
        let supports_range = response.status() == StatusCode::PARTIAL_CONTENT;
        let content_length = content_length(&response);
        let mut total_length = total_length(&response);
        if supports_range && total_length == 0 && content_length > 0 {
            // Content-Range total was "*": the range runs to the end.
            total_length = start_offset + content_length;
        }

        let stream = response.bytes_stream().map_err(body_error);
        Self {
            total_length,
            content_length,
            supports_range,
            body: Box::new(StreamReader::new(Box::pin(stream))),
        }
    }
}

impl NetworkResponse for HttpResponse {
    fn total_length(&self) -> u64 {
        self.total_length
    }

    fn content_length(&self) -> u64 {
        self.content_length
    }

    fn supports_range(&self) -> bool {
        self.supports_range
    }

    fn content_stream(&mut self) -> &mut (dyn AsyncRead + Send + Unpin) {
        self.body.as_mut()
    }

    fn disconnect(&mut self) {
        // Dropping the body releases the connection.
        self.body = Box::new(tokio::io::empty());
    }
}

/// Body errors keep the reqwest error as their payload; connection-level
/// ones are tagged so they classify as a lost connection.
fn body_error(err: reqwest::Error) -> io::Error {
    let kind = if err.is_timeout() {
        io::ErrorKind::TimedOut
    } else if err.is_body() || err.is_connect() {
        io::ErrorKind::ConnectionAborted
    } else {
        io::ErrorKind::Other
    };
    io::Error::new(kind, err)
}
