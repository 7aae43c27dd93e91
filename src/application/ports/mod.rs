//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_input;
pub mod config;
pub mod recording_writer;

// Re-export common types
pub use audio_input::{AudioInput, AudioInputError, InputStream};
pub use config::ConfigStore;
pub use recording_writer::{RecordingWriteError, RecordingWriter};
