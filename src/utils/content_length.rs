//! Declared length extraction utilities.
//!
//! This module reads the lengths a server declares for a (possibly ranged)
//! response from its Content-Range and Content-Length headers.

use reqwest::header::CONTENT_RANGE;
use reqwest::{Response, StatusCode};

/// Parse Content-Range header to extract total size.
///
/// Content-Range header format: "bytes start-end/total". An unknown total
/// (`*`) yields `None`.
///
/// # Example
///
/// ```rust
/// use resumable::utils::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
/// assert_eq!(parse_content_range_total("bytes 0-1023/*"), None);
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    content_range
        .split('/')
        .next_back()
        .and_then(|size| size.trim().parse::<u64>().ok())
}

/// Size of the body carried by this response, 0 when undeclared.
pub fn content_length(response: &Response) -> u64 {
    response.content_length().unwrap_or(0)
}

/// Full size of the remote resource, 0 when it cannot be determined.
///
/// A partial response reports it in the Content-Range total. A full response
/// carries the whole resource, so its body length is the total.
pub fn total_length(response: &Response) -> u64 {
    if response.status() == StatusCode::PARTIAL_CONTENT {
        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .unwrap_or(0)
    } else {
        content_length(response)
    }
}
