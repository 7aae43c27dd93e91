//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod audio;
pub mod config;
pub mod error;
pub mod recording;
pub mod session;

// Re-export common types
pub use audio::{AudioParameters, Channels, SampleFormat};
pub use config::AppConfig;
pub use error::*;
pub use recording::{Recording, RecordingBuffer};
pub use session::{CaptureSession, CaptureState, StopSignal};
