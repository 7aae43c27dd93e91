//! Silent audio input adapter
//!
//! Produces zero-level chunks at the pace a real device would. Used when no
//! microphone is available.

use std::thread;
use std::time::Duration;

use crate::application::ports::{AudioInput, AudioInputError, InputStream};
use crate::domain::audio::AudioParameters;

/// Audio input that records silence
pub struct SilentInput {
    pace: Option<Duration>,
}

impl SilentInput {
    /// Deliver one chunk per chunk duration, like a live device
    pub fn new() -> Self {
        Self { pace: None }
    }

    /// Deliver one chunk every `interval` instead of in real time
    #[cfg(test)]
    fn with_pacing(interval: Duration) -> Self {
        Self {
            pace: Some(interval),
        }
    }
}

impl Default for SilentInput {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioInput for SilentInput {
    fn open(&self, params: &AudioParameters) -> Result<Box<dyn InputStream>, AudioInputError> {
        let silence = params.sample_format().silence_byte();
        Ok(Box::new(SilentStream {
            chunk: vec![silence; params.chunk_bytes()],
            interval: self.pace.unwrap_or_else(|| params.chunk_duration()),
        }))
    }
}

struct SilentStream {
    chunk: Vec<u8>,
    interval: Duration,
}

impl InputStream for SilentStream {
    fn read_chunk(&mut self) -> Result<Vec<u8>, AudioInputError> {
        thread::sleep(self.interval);
        Ok(self.chunk.clone())
    }

    fn close(self: Box<Self>) -> Result<(), AudioInputError> {
        Ok(())
    }
}
