//! The transfer request data model.
//!
//! A [`TransferRequest`] describes one download: where the bytes come from,
//! where they go, how far a previous run got, and how the caller wants to be
//! notified. It is plain data plus a few notification hooks; only the
//! [`TransferEngine`](crate::engine::TransferEngine) moves its counters.
//!
//! # Examples
//!
//! ## Creating a Request
//!
//! ```rust
//! use resumable::request::TransferRequest;
//!
//! let request = TransferRequest::new("https://example.com/file.zip", "file.zip")?;
//! assert_eq!(request.start_offset(), 0);
//! assert_eq!(request.effective_url(), "https://example.com/file.zip");
//! # Ok::<(), resumable::Error>(())
//! ```
//!
//! ## Resuming with Hooks
//!
//! ```rust
//! use resumable::request::TransferRequest;
//! use std::time::Duration;
//!
//! let request = TransferRequest::builder("https://example.com/file.zip", "file.zip")
//!     .start_offset(4096)
//!     .progress_interval(Duration::from_millis(250))
//!     .on_loading(|downloaded| println!("{downloaded} bytes this attempt"))
//!     .on_finish(|result| println!("finished: {:?}", result))
//!     .build()?;
//! assert_eq!(request.current_bytes(), 4096);
//! # Ok::<(), resumable::Error>(())
//! ```
//!
//! ## Cancelling from Another Task
//!
//! ```rust
//! use resumable::request::TransferRequest;
//!
//! let request = TransferRequest::new("https://example.com/file.zip", "file.zip")?;
//! let handle = request.cancel_handle();
//! std::thread::spawn(move || handle.cancel()).join().unwrap();
//! assert!(request.is_cancelled());
//! # Ok::<(), resumable::Error>(())
//! ```

pub mod builder;
pub mod hooks;
pub mod request;

pub use builder::TransferRequestBuilder;
pub use hooks::{FinishCallback, LengthCallback, NotifyCallback, RequestHooks};
pub use request::{CancelHandle, TransferRequest, DEFAULT_PROGRESS_INTERVAL};
