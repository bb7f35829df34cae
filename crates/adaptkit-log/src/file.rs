// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only log file target.
//!
//! The file is opened synchronously so that open failures reach the caller.
//! Writes are handed to a single writer task over an unbounded channel: the
//! task performs them one at a time in arrival order, so at most one write is
//! ever in flight and nothing is reordered or dropped. Messages sent before
//! the task first runs simply wait in the channel.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use adaptkit_core::{AdaptKitError, Disposable, WindowHost};
use tokio::io::AsyncWriteExt;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct FileTarget {
    path: PathBuf,
    queue: Mutex<Option<mpsc::UnboundedSender<String>>>,
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl FileTarget {
    /// Open `path` for appending (creating it) and start the writer task on
    /// the current tokio runtime.
    ///
    /// The open itself blocks the calling thread so that an unopenable path
    /// is reported here, before any line is queued; only writes are async.
    pub fn open(path: impl AsRef<Path>, window: Arc<dyn WindowHost>) -> Result<Self, AdaptKitError> {
        let path = path.as_ref().to_path_buf();
        let runtime = Handle::try_current().map_err(|e| {
            AdaptKitError::Runtime(format!("log file {} needs a tokio runtime: {e}", path.display()))
        })?;

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| AdaptKitError::LogFile {
                path: path.clone(),
                source,
            })?;

        let (tx, rx) = mpsc::unbounded_channel();
        let writer = runtime.spawn(drain(
            tokio::fs::File::from_std(file),
            rx,
            path.clone(),
            window,
        ));
        debug!(path = %path.display(), "log file opened");

        Ok(Self {
            path,
            queue: Mutex::new(Some(tx)),
            writer: Mutex::new(Some(writer)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Queue one line. Ignored after disposal.
    pub fn write(&self, message: &str) {
        let queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tx) = queue.as_ref()
            && tx.send(message.to_string()).is_err()
        {
            warn!(path = %self.path.display(), "log file writer has stopped, line dropped");
        }
    }

    /// Dispose and wait for the writer to finish the queued lines.
    pub async fn close(&self) {
        self.dispose();
        let writer = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(writer) = writer
            && let Err(e) = writer.await
        {
            warn!(path = %self.path.display(), error = %e, "log file writer failed");
        }
    }
}

impl Disposable for FileTarget {
    /// Closes the queue; the writer finishes what was already queued and then
    /// drops the handle.
    fn dispose(&self) {
        let sender = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if sender.is_some() {
            debug!(path = %self.path.display(), "log file target disposed");
        }
    }
}

impl std::fmt::Debug for FileTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTarget").field("path", &self.path).finish()
    }
}

async fn drain(
    mut file: tokio::fs::File,
    mut queue: mpsc::UnboundedReceiver<String>,
    path: PathBuf,
    window: Arc<dyn WindowHost>,
) {
    while let Some(mut message) = queue.recv().await {
        message.push('\n');
        if let Err(e) = write_line(&mut file, message.as_bytes()).await {
            warn!(path = %path.display(), error = %e, "log file write failed");
            window.show_error_message(&format!(
                "Couldn't write to log file {}: {e}",
                path.display()
            ));
        }
    }
    debug!(path = %path.display(), "log file closed");
}

async fn write_line(file: &mut tokio::fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}
