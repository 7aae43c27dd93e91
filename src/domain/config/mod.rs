//! Configuration value objects

mod app_config;

pub use app_config::{AppConfig, INPUT_CPAL, INPUT_SILENCE, VALID_INPUTS};
