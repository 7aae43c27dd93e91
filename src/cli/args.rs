//! CLI argument definitions using Clap

use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

use crate::domain::config::AppConfig;

/// pcm-recorder - record microphone audio to WAV files
#[derive(Parser, Debug)]
#[command(name = "pcm-recorder")]
#[command(version)]
#[command(about = "Record microphone audio to memory and save it as PCM WAV files")]
#[command(long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub audio: AudioArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Log level for this crate's modules
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Set up env_logger from the verbosity flag.
///
/// Dependencies stay at warn; `RUST_LOG` overrides both.
pub fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    builder.filter_module("pcm_recorder", cli.log_level());
    builder.parse_default_env();
    builder.format_timestamp_millis().init();
}

/// Capture settings shared by every command.
/// Unset flags fall back to the config file, then to built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct AudioArgs {
    /// Channel count (1 or 2)
    #[arg(short = 'c', long, value_name = "N", global = true)]
    pub channels: Option<u16>,

    /// Sample format (uint8, int8, int16, int24, int32, float32)
    #[arg(short = 'f', long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    /// Sample rate in Hz (e.g. 8000, 16000, 44100)
    #[arg(short = 'r', long = "rate", value_name = "HZ", global = true)]
    pub sample_rate: Option<u32>,

    /// Directory recordings are saved into
    #[arg(short = 'o', long, value_name = "DIR", global = true)]
    pub output_dir: Option<String>,

    /// Audio input backend (cpal, silence)
    #[arg(long, value_name = "INPUT", global = true)]
    pub input: Option<String>,

    /// Input device name (see `pcm-recorder devices`)
    #[arg(long, value_name = "NAME", global = true)]
    pub device: Option<String>,
}

impl AudioArgs {
    /// The flags as a partial config, for merging over file values
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            channels: self.channels,
            format: self.format.clone(),
            sample_rate: self.sample_rate,
            output_dir: self.output_dir.clone(),
            input: self.input.clone(),
            device: self.device.clone(),
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record once, then save (stop with Ctrl+C or --duration)
    Record {
        /// Recording name (default: PcmAudio <date time>)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Stop automatically after this long (e.g., 10s, 1m, 2m30s)
        #[arg(short = 'd', long, value_name = "TIME")]
        duration: Option<String>,
    },
    /// List audio input devices
    Devices,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "channels",
    "format",
    "sample_rate",
    "output_dir",
    "input",
    "device",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
