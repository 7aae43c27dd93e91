//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::audio::{AudioParameters, Channels, SampleFormat, DEFAULT_SAMPLE_RATE};
use crate::domain::error::ParameterError;

/// Input backend names
pub const INPUT_CPAL: &str = "cpal";
pub const INPUT_SILENCE: &str = "silence";
pub const VALID_INPUTS: &[&str] = &[INPUT_CPAL, INPUT_SILENCE];

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub channels: Option<u16>,
    pub format: Option<String>,
    pub sample_rate: Option<u32>,
    pub output_dir: Option<String>,
    pub input: Option<String>,
    pub device: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            channels: Some(1),
            format: Some(SampleFormat::default().as_str().to_string()),
            sample_rate: Some(DEFAULT_SAMPLE_RATE),
            output_dir: Some(".".to_string()),
            input: Some(INPUT_CPAL.to_string()),
            device: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    pub fn merge(self, other: Self) -> Self {
        Self {
            channels: other.channels.or(self.channels),
            format: other.format.or(self.format),
            sample_rate: other.sample_rate.or(self.sample_rate),
            output_dir: other.output_dir.or(self.output_dir),
            input: other.input.or(self.input),
            device: other.device.or(self.device),
        }
    }

    /// Build capture parameters from the configured values.
    ///
    /// Unset fields fall back to defaults; set but invalid fields are an error.
    pub fn audio_parameters(&self) -> Result<AudioParameters, ParameterError> {
        let channels = match self.channels {
            Some(count) => Channels::from_count(count)?,
            None => Channels::default(),
        };
        let format = match self.format.as_deref() {
            Some(name) => name.parse()?,
            None => SampleFormat::default(),
        };
        AudioParameters::new(
            channels,
            format,
            self.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
        )
    }

    /// Get output directory, or the current directory if not set
    pub fn output_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.output_dir.as_deref().unwrap_or("."))
    }

    /// Get input backend, or "cpal" if not set
    pub fn input_or_default(&self) -> &str {
        self.input.as_deref().unwrap_or(INPUT_CPAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.channels, Some(1));
        assert_eq!(config.format, Some("int16".to_string()));
        assert_eq!(config.sample_rate, Some(16000));
        assert_eq!(config.output_dir, Some(".".to_string()));
        assert_eq!(config.input_or_default(), "cpal");
        assert!(config.device.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.channels.is_none());
        assert!(config.format.is_none());
        assert!(config.sample_rate.is_none());
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            channels: Some(1),
            format: Some("int16".to_string()),
            sample_rate: Some(16000),
            ..Default::default()
        };
        let other = AppConfig {
            channels: Some(2),
            format: None,
            sample_rate: Some(44100),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.channels, Some(2));
        assert_eq!(merged.format, Some("int16".to_string()));
        assert_eq!(merged.sample_rate, Some(44100));
    }

    #[test]
    fn audio_parameters_from_defaults() {
        let params = AppConfig::defaults().audio_parameters().unwrap();
        assert_eq!(params, AudioParameters::default());
    }

    #[test]
    fn audio_parameters_from_empty_config() {
        let params = AppConfig::empty().audio_parameters().unwrap();
        assert_eq!(params, AudioParameters::default());
    }

    #[test]
    fn audio_parameters_from_labels() {
        let config = AppConfig {
            channels: Some(2),
            format: Some("32-bit float".to_string()),
            sample_rate: Some(48000),
            ..Default::default()
        };
        let params = config.audio_parameters().unwrap();
        assert_eq!(params.channels(), Channels::Stereo);
        assert_eq!(params.sample_format(), SampleFormat::Float32);
        assert_eq!(params.sample_rate(), 48000);
    }

    #[test]
    fn audio_parameters_reject_invalid_values() {
        let bad_channels = AppConfig {
            channels: Some(6),
            ..Default::default()
        };
        assert!(bad_channels.audio_parameters().is_err());

        let bad_format = AppConfig {
            format: Some("mp3".to_string()),
            ..Default::default()
        };
        assert!(bad_format.audio_parameters().is_err());
    }

    #[test]
    fn output_dir_defaults_to_cwd() {
        assert_eq!(AppConfig::empty().output_dir_or_default(), PathBuf::from("."));
    }
}
