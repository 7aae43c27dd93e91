//! Capture session state machine

use std::fmt;
use thiserror::Error;

/// Capture states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
    Finalizing,
}

impl CaptureState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
            Self::Finalizing => "finalizing",
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: CaptureState,
    pub action: String,
}

/// Lifecycle of one capture, from start to the recording landing in the store.
///
/// State machine:
///   IDLE -> CAPTURING (begin)
///   CAPTURING -> FINALIZING (stop observed)
///   CAPTURING -> IDLE (abort, device failure)
///   FINALIZING -> IDLE (complete)
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    fn transition(
        &mut self,
        from: CaptureState,
        to: CaptureState,
        action: &str,
    ) -> Result<(), InvalidStateTransition> {
        if self.state != from {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }

    /// IDLE -> CAPTURING
    pub fn begin(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(CaptureState::Idle, CaptureState::Capturing, "start capture")
    }

    /// CAPTURING -> FINALIZING
    pub fn finalize(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            CaptureState::Capturing,
            CaptureState::Finalizing,
            "finalize capture",
        )
    }

    /// CAPTURING -> IDLE, dropping whatever was captured
    pub fn abort(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(CaptureState::Capturing, CaptureState::Idle, "abort capture")
    }

    /// FINALIZING -> IDLE
    pub fn complete(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            CaptureState::Finalizing,
            CaptureState::Idle,
            "complete capture",
        )
    }
}
