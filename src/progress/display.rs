//! Progress bar delivery.

use super::delivery::ProgressDelivery;
use super::style::ProgressBarOpts;
use crate::request::TransferRequest;

use indicatif::ProgressBar;

/// Shows the transfer of one file on an indicatif progress bar.
///
/// The bar tracks [`TransferRequest::current_bytes`], so a resumed transfer
/// starts where the previous one stopped. indicatif limits redraws itself.
#[derive(Debug, Clone)]
pub struct ProgressBarDelivery {
    bar: ProgressBar,
    opts: ProgressBarOpts,
}

impl ProgressBarDelivery {
    /// Creates a bar with unknown length, styled by `opts`.
    pub fn new(opts: ProgressBarOpts) -> Self {
        Self {
            bar: opts.clone().to_progress_bar(0),
            opts,
        }
    }

    /// The underlying progress bar.
    pub fn progress_bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// Finish the bar, clearing it if the options ask for it.
    pub fn finish(&self) {
        if self.opts.clear() {
            self.bar.finish_and_clear();
        } else {
            self.bar.finish();
        }
    }
}

impl ProgressDelivery for ProgressBarDelivery {
    fn post_total_length(&self, request: &TransferRequest, total_bytes: u64) {
        if let Some(name) = request.target_file().file_name() {
            self.bar.set_message(name.to_string_lossy().into_owned());
        }
        self.bar.set_length(total_bytes);
        self.bar.set_position(request.start_offset());
    }

    fn post_loading(&self, request: &TransferRequest, downloaded_bytes: u64) {
        self.bar.set_position(request.start_offset() + downloaded_bytes);
    }
}
