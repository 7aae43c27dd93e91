//! Capture session lifecycle

mod capture_session;
mod stop_signal;

pub use capture_session::{CaptureSession, CaptureState, InvalidStateTransition};
pub use stop_signal::StopSignal;
