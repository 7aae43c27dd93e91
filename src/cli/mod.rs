//! CLI layer - Command-line interface
//!
//! Contains argument parsing, the interactive console, output formatting,
//! signal handling, and the application runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod console;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{
    load_merged_config, run_console, run_devices, run_record, EXIT_ERROR, EXIT_SUCCESS,
    EXIT_USAGE_ERROR,
};
pub use args::{init_logging, AudioArgs, Cli, Commands, ConfigAction};
pub use presenter::Presenter;
