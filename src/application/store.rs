//! Buffered recordings awaiting save or clear

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::domain::recording::Recording;

use super::ports::RecordingWriter;

/// Errors from the recording store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Failed to save \"{name}\": {message}")]
    FileWrite { name: String, message: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Ordered collection of completed recordings.
///
/// Cloning yields another handle to the same collection, so the capture
/// worker and the control side share one store per controller. Order is
/// insertion order; names are not deduplicated.
///
/// A capture that is still running when `clear` is called appends its
/// recording afterwards; clearing only drops what has already finished.
#[derive(Clone)]
pub struct RecordingStore {
    recordings: Arc<Mutex<Vec<Arc<Recording>>>>,
    writer: Arc<dyn RecordingWriter>,
}

impl RecordingStore {
    /// Create an empty store that saves through `writer`
    pub fn new(writer: Arc<dyn RecordingWriter>) -> Self {
        Self {
            recordings: Arc::new(Mutex::new(Vec::new())),
            writer,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<Recording>>> {
        self.recordings.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a finished recording at the end
    pub fn append(&self, recording: Recording) {
        log::debug!(
            "Buffering recording {} ({} bytes)",
            recording.name(),
            recording.size_bytes()
        );
        self.lock().push(Arc::new(recording));
    }

    /// Number of completed recordings held
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of the buffered recordings, oldest first
    pub fn recordings(&self) -> Vec<Arc<Recording>> {
        self.lock().clone()
    }

    /// Write every buffered recording, in order.
    ///
    /// Stops at the first failure. Nothing is removed from the store by a
    /// save, so the failed recording and everything after it can be retried.
    /// Returns the number of files written.
    pub fn save_all(&self) -> Result<usize, StoreError> {
        // Snapshot so a finishing capture is not blocked behind disk writes
        let pending = self.recordings();

        for (saved, recording) in pending.iter().enumerate() {
            match self.writer.write(recording) {
                Ok(path) => log::info!("Saved {}", path.display()),
                Err(e) => {
                    log::error!(
                        "Saving stopped after {} of {} recordings: {}",
                        saved,
                        pending.len(),
                        e
                    );
                    return Err(StoreError::FileWrite {
                        name: recording.name().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(pending.len())
    }

    /// Saving a single recording is not supported
    pub fn save_one(&self, identifier: &str) -> Result<(), StoreError> {
        Err(StoreError::Unsupported(format!(
            "saving a single recording (\"{}\") is not implemented; use save_all",
            identifier
        )))
    }

    /// Drop every buffered recording
    pub fn clear(&self) {
        let mut recordings = self.lock();
        log::debug!("Clearing {} buffered recordings", recordings.len());
        recordings.clear();
    }
}
