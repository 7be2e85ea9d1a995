//! Shared utility functions.
//!
//! - [`content_length`] - Declared length extraction from HTTP responses

pub mod content_length;

pub use content_length::{content_length, parse_content_range_total, total_length};
