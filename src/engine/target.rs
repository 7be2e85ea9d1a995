//! The target file of one attempt.

use std::io::{self, SeekFrom};
use std::path::Path;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, warn};

/// Write handle on the target file, positioned at the attempt's start offset.
pub(crate) struct TargetFile {
    file: File,
}

impl TargetFile {
    /// Open `path` for an attempt starting at `start_offset`.
    ///
    /// A fresh transfer (offset 0) truncates the file and pre-sizes it to
    /// `total_length`. A resumed transfer keeps the existing bytes and seeks.
    pub(crate) async fn open(path: &Path, total_length: u64, start_offset: u64) -> io::Result<Self> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            debug!("Creating destination directory {:?}", dir);
            fs::create_dir_all(dir).await?;
        }

        let file = if start_offset == 0 {
            debug!("Creating destination file {:?} ({} bytes)", path, total_length);
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .await?;
            file.set_len(total_length).await?;
            file
        } else {
            debug!("Resuming destination file {:?} at byte {}", path, start_offset);
            let mut file = OpenOptions::new().create(true).write(true).open(path).await?;
            file.seek(SeekFrom::Start(start_offset)).await?;
            file
        };

        Ok(Self { file })
    }

    /// Write `chunk` and wait until the write has reached the file, so a
    /// failure is reported for the chunk that caused it.
    pub(crate) async fn write_all(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.file.flush().await
    }

    /// Make every written byte durable before the transfer is reported done.
    pub(crate) async fn finish(&mut self) -> io::Result<()> {
        self.file.flush().await?;
        self.file.sync_data().await
    }

    /// Flush pending writes and close the file. Failures are logged only.
    pub(crate) async fn close(mut self, path: &Path) {
        if let Err(e) = self.file.flush().await {
            warn!("Failed to flush {:?}: {}", path, e);
        }
        if let Err(e) = self.file.shutdown().await {
            warn!("Failed to close {:?}: {}", path, e);
        }
    }
}
