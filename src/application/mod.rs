//! Application layer - Core services and port interfaces
//!
//! Contains the capture controller, the recording store, and the trait
//! definitions for the audio device, persistence, and configuration.

pub mod capture;
pub mod ports;
pub mod store;

pub use capture::{CaptureController, CaptureError};
pub use store::{RecordingStore, StoreError};
