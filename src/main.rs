//! pcm-recorder CLI entry point

use std::process::ExitCode;

use clap::Parser;

use pcm_recorder::cli::{
    app::{load_merged_config, run_console, run_devices, run_record, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{init_logging, Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use pcm_recorder::domain::recording::Duration;
use pcm_recorder::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    let presenter = Presenter::new();

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Some(Commands::Devices) => run_devices(),
        Some(Commands::Record { name, duration }) => {
            let limit = match duration.as_deref().map(str::parse::<Duration>) {
                Some(Ok(d)) => Some(d.as_std()),
                Some(Err(e)) => {
                    presenter.error(&e.to_string());
                    return ExitCode::from(EXIT_USAGE_ERROR);
                }
                None => None,
            };

            let config = load_merged_config(cli.audio.to_config()).await;
            run_record(config, name, limit).await
        }
        None => {
            let config = load_merged_config(cli.audio.to_config()).await;
            run_console(config).await
        }
    }
}
