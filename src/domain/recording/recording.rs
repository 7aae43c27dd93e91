//! Completed recording entity

use std::time::Duration;

use chrono::{DateTime, TimeZone};

use crate::domain::audio::AudioParameters;

/// Prefix of names generated when the caller does not supply one
pub const GENERATED_NAME_PREFIX: &str = "PcmAudio";

/// File extension appended to every recording name
pub const WAV_EXTENSION: &str = ".wav";

/// Build the file name for a new recording.
///
/// A missing or blank name is replaced by `PcmAudio <dd-mm-YYYY HH-MM-SS>`
/// using `now`. Any other name is kept as given and gets `.wav` appended.
pub fn recording_name<Tz>(requested: Option<&str>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match requested.filter(|name| !name.trim().is_empty()) {
        Some(name) => format!("{}{}", name, WAV_EXTENSION),
        None => format!(
            "{} {}{}",
            GENERATED_NAME_PREFIX,
            now.format("%d-%m-%Y %H-%M-%S"),
            WAV_EXTENSION
        ),
    }
}

/// A finished capture waiting in the store to be saved or cleared.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    name: String,
    samples: Vec<u8>,
    parameters: AudioParameters,
}

impl Recording {
    pub fn new(name: impl Into<String>, samples: Vec<u8>, parameters: AudioParameters) -> Self {
        Self {
            name: name.into(),
            samples,
            parameters,
        }
    }

    /// File name the recording is saved under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw interleaved sample bytes, exactly as captured
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn parameters(&self) -> &AudioParameters {
        &self.parameters
    }

    pub fn size_bytes(&self) -> usize {
        self.samples.len()
    }

    pub fn duration(&self) -> Duration {
        self.parameters.duration_of(self.samples.len())
    }
}
