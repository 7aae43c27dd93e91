//! Recording persistence port

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::recording::Recording;

/// Error when a recording could not be persisted
#[derive(Debug, Clone, Error)]
#[error("Failed to write {path}: {message}")]
pub struct RecordingWriteError {
    pub path: PathBuf,
    pub message: String,
}

/// Port for writing a finished recording to durable storage
pub trait RecordingWriter: Send + Sync {
    /// Write the recording completely and return where it was written
    fn write(&self, recording: &Recording) -> Result<PathBuf, RecordingWriteError>;
}
