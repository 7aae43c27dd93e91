//! Audio input adapters

mod cpal_input;
mod silence;

pub use cpal_input::CpalAudioInput;
pub use silence::SilentInput;

use crate::application::ports::AudioInput;
use crate::domain::config::{INPUT_CPAL, INPUT_SILENCE};
use crate::domain::error::ConfigError;

/// Create the audio input adapter named by the `input` setting
pub fn create_audio_input(
    input: &str,
    device: Option<&str>,
) -> Result<Box<dyn AudioInput>, ConfigError> {
    let adapter: Box<dyn AudioInput> = match (input, device) {
        (INPUT_CPAL, Some(name)) => Box::new(CpalAudioInput::with_device(name)),
        (INPUT_CPAL, None) => Box::new(CpalAudioInput::new()),
        (INPUT_SILENCE, _) => Box::new(SilentInput::new()),
        (other, _) => {
            return Err(ConfigError::ValidationError {
                key: "input".to_string(),
                message: format!("unknown input '{}'", other),
            })
        }
    };
    Ok(adapter)
}
