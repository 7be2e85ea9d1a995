//! Progress delivery.
//!
//! The engine reports progress unconditionally: once when the remote length
//! is known, and after every chunk it writes. A [`ProgressDelivery`] decides
//! what to do with those events and how often to pass them on.
//!
//! - `delivery` - the [`ProgressDelivery`] trait, [`HookDelivery`] and [`NoopDelivery`]
//! - `display` - [`ProgressBarDelivery`], an indicatif progress bar
//! - `style` - progress bar styling options
//!
//! # Examples
//!
//! ```rust
//! use resumable::progress::{ProgressBarDelivery, ProgressBarOpts};
//!
//! let delivery = ProgressBarDelivery::new(ProgressBarOpts::with_pip_style());
//! let hidden = ProgressBarDelivery::new(ProgressBarOpts::hidden());
//! assert!(hidden.progress_bar().is_hidden());
//! ```

pub(crate) mod delivery;
pub(crate) mod display;
pub(crate) mod style;

pub use delivery::{HookDelivery, NoopDelivery, ProgressDelivery};
pub use display::ProgressBarDelivery;
pub use style::ProgressBarOpts;
