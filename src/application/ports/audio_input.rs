//! Audio input port interfaces

use thiserror::Error;

use crate::domain::audio::AudioParameters;

/// Audio input errors
#[derive(Debug, Clone, Error)]
pub enum AudioInputError {
    #[error("Failed to open audio input: {0}")]
    DeviceOpen(String),

    #[error("Failed to read from audio input: {0}")]
    DeviceRead(String),

    #[error("No audio input device available")]
    NoAudioDevice,
}

/// Port for the host audio subsystem.
///
/// `open` is called on the capture worker thread, so the returned stream
/// does not need to be `Send`.
pub trait AudioInput: Send + Sync {
    /// Open an input stream with the given channel count, sample format and
    /// rate. Each subsequent read yields `params.chunk_bytes()` bytes.
    fn open(&self, params: &AudioParameters) -> Result<Box<dyn InputStream>, AudioInputError>;
}

impl<T: AudioInput + ?Sized> AudioInput for Box<T> {
    fn open(&self, params: &AudioParameters) -> Result<Box<dyn InputStream>, AudioInputError> {
        (**self).open(params)
    }
}

/// An open capture stream
pub trait InputStream {
    /// Block until one chunk (100ms of audio) is available and return its raw bytes
    fn read_chunk(&mut self) -> Result<Vec<u8>, AudioInputError>;

    /// Stop the stream and release the device
    fn close(self: Box<Self>) -> Result<(), AudioInputError>;
}
