//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::audio::{AudioParameters, Channels, SampleFormat};
use crate::domain::config::{AppConfig, VALID_INPUTS};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_config_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!(
        "{} = {}",
        key,
        config_value(&config, key).unwrap_or_default()
    ));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match config_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            config_value(&config, key).as_deref().unwrap_or(NOT_SET),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl ToString) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// Validate `value` for `key` and store it in canonical form
fn apply_config_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    match key {
        "channels" => {
            let channels: Channels = value.parse().map_err(|e| invalid(key, e))?;
            config.channels = Some(channels.count());
        }
        "format" => {
            let format: SampleFormat = value.parse().map_err(|e| invalid(key, e))?;
            config.format = Some(format.as_str().to_string());
        }
        "sample_rate" => {
            let rate: u32 = value
                .parse()
                .map_err(|_| invalid(key, format!("'{}' is not a number", value)))?;
            AudioParameters::new(Channels::default(), SampleFormat::default(), rate)
                .map_err(|e| invalid(key, e))?;
            config.sample_rate = Some(rate);
        }
        "output_dir" => {
            if value.is_empty() {
                return Err(invalid(key, "Value must not be empty"));
            }
            config.output_dir = Some(value.to_string());
        }
        "input" => {
            let lower = value.to_lowercase();
            if !VALID_INPUTS.contains(&lower.as_str()) {
                return Err(invalid(
                    key,
                    format!(
                        "Invalid value '{}'. Valid options: {}",
                        value,
                        VALID_INPUTS.join(", ")
                    ),
                ));
            }
            config.input = Some(lower);
        }
        "device" => {
            if value.is_empty() {
                return Err(invalid(key, "Value must not be empty"));
            }
            config.device = Some(value.to_string());
        }
        other => return Err(invalid(other, "Unknown key")),
    }
    Ok(())
}

/// Display form of a config value, if set
fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "channels" => config.channels.map(|c| c.to_string()),
        "format" => config.format.clone(),
        "sample_rate" => config.sample_rate.map(|r| r.to_string()),
        "output_dir" => config.output_dir.clone(),
        "input" => config.input.clone(),
        "device" => config.device.clone(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(key: &str, value: &str) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::empty();
        apply_config_value(&mut config, key, value)?;
        Ok(config)
    }

    #[test]
    fn channels_accept_count_and_name() {
        assert_eq!(apply("channels", "2").unwrap().channels, Some(2));
        assert_eq!(apply("channels", "mono").unwrap().channels, Some(1));
        assert!(apply("channels", "3").is_err());
    }

    #[test]
    fn format_is_stored_canonically() {
        let config = apply("format", "24-bit int").unwrap();
        assert_eq!(config.format.as_deref(), Some("int24"));
        assert!(apply("format", "mp3").is_err());
    }

    #[test]
    fn sample_rate_must_be_usable() {
        assert_eq!(apply("sample_rate", "44100").unwrap().sample_rate, Some(44100));
        assert!(apply("sample_rate", "fast").is_err());
        assert!(apply("sample_rate", "5").is_err());
    }

    #[test]
    fn input_must_be_known() {
        assert_eq!(apply("input", "Silence").unwrap().input.as_deref(), Some("silence"));
        assert!(apply("input", "pulse").is_err());
    }

    #[test]
    fn free_text_values_must_not_be_empty() {
        assert!(apply("output_dir", " ").is_err());
        assert!(apply("device", "").is_err());
        assert_eq!(
            apply("device", "USB Mic").unwrap().device.as_deref(),
            Some("USB Mic")
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        match check_key("api_key") {
            Err(ConfigError::ValidationError { key, message }) => {
                assert_eq!(key, "api_key");
                assert!(message.contains("sample_rate"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn config_value_formats_numbers() {
        let config = AppConfig::defaults();
        assert_eq!(config_value(&config, "channels").as_deref(), Some("1"));
        assert_eq!(config_value(&config, "sample_rate").as_deref(), Some("16000"));
        assert!(config_value(&config, "device").is_none());
    }
}
