//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the host audio stack, the filesystem and the config file.

pub mod audio;
pub mod config;
pub mod wav;

// Re-export adapters
pub use audio::{create_audio_input, CpalAudioInput, SilentInput};
pub use config::XdgConfigStore;
pub use wav::HoundWavWriter;
