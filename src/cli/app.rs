//! Runners for the interactive console and one-shot recording

use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::ports::{AudioInput, ConfigStore};
use crate::application::{CaptureController, RecordingStore};
use crate::domain::audio::AudioParameters;
use crate::domain::config::AppConfig;
use crate::infrastructure::{create_audio_input, CpalAudioInput, HoundWavWriter, XdgConfigStore};

use super::console::{spawn_line_reader, ConsoleCommand, CONSOLE_HELP};
use super::presenter::{format_clock, Presenter};
use super::signals::InterruptSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Spinner refresh while recording
const TICK: Duration = Duration::from_millis(100);

type Controller = CaptureController<Box<dyn AudioInput>>;

/// Capture controller plus the settings every capture uses
struct Recorder {
    controller: Arc<Controller>,
    params: AudioParameters,
    output_dir: PathBuf,
}

impl Recorder {
    fn from_config(config: &AppConfig) -> Result<Self, String> {
        let params = config.audio_parameters().map_err(|e| e.to_string())?;
        let input = create_audio_input(config.input_or_default(), config.device.as_deref())
            .map_err(|e| e.to_string())?;
        let output_dir = config.output_dir_or_default();
        let writer = HoundWavWriter::with_output_dir(&output_dir);
        let store = RecordingStore::new(Arc::new(writer));

        log::debug!(
            "Recorder ready: {} via {}, saving to {}",
            params,
            config.input_or_default(),
            output_dir.display()
        );

        Ok(Self {
            controller: Arc::new(CaptureController::new(input, store)),
            params,
            output_dir,
        })
    }

    fn store(&self) -> &RecordingStore {
        self.controller.store()
    }

    /// Open the device and begin capturing; returns the recording name
    async fn start(&self, name: Option<String>) -> Result<String, String> {
        let controller = Arc::clone(&self.controller);
        let params = self.params;
        run_blocking(move || controller.start(name.as_deref(), params)).await
    }

    /// Stop the capture and wait until its recording is in the store
    async fn finish(&self) -> Result<(), String> {
        self.controller.stop();
        let controller = Arc::clone(&self.controller);
        run_blocking(move || controller.wait()).await
    }

    async fn save(&self) -> Result<usize, String> {
        let store = self.store().clone();
        run_blocking(move || store.save_all()).await
    }
}

/// Run a blocking core call off the async runtime
async fn run_blocking<T, E, F>(f: F) -> Result<T, String>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(e) => Err(format!("background task failed: {}", e)),
    }
}

/// Run the interactive console until `quit`, end of input, or Ctrl+C while idle
pub async fn run_console(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let recorder = match Recorder::from_config(&config) {
        Ok(recorder) => recorder,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let mut interrupts = InterruptSignal::listen();
    let mut lines = spawn_line_reader();

    presenter.info(&format!(
        "{}, saving to {}",
        recorder.params,
        recorder.output_dir.display()
    ));
    presenter.info("Type 'help' for commands");

    let mut exit = EXIT_SUCCESS;
    loop {
        presenter.prompt();
        tokio::select! {
            _ = interrupts.recv() => {
                eprintln!();
                if !recorder.controller.is_capturing() {
                    break;
                }
                stop_recording(&recorder, &presenter).await;
            }
            line = lines.recv() => match line {
                Some(Ok(line)) => match line.parse::<ConsoleCommand>() {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => execute(command, &recorder, &presenter).await,
                    Err(e) => presenter.error(&e.to_string()),
                },
                None => break,
                Some(Err(e)) => {
                    presenter.error(&format!("Failed to read input: {}", e));
                    exit = EXIT_ERROR;
                    break;
                }
            },
        }
    }

    if recorder.controller.is_capturing() {
        stop_recording(&recorder, &presenter).await;
    }
    let unsaved = recorder.store().size();
    if unsaved > 0 {
        presenter.warn(&format!("Discarding {} unsaved recording(s)", unsaved));
    }

    ExitCode::from(exit)
}

async fn execute(command: ConsoleCommand, recorder: &Recorder, presenter: &Presenter) {
    match command {
        ConsoleCommand::Record(name) => match recorder.start(name).await {
            Ok(name) => presenter.info(&format!(
                "Recording {} ({}). Type 'stop' to finish",
                name, recorder.params
            )),
            Err(e) => presenter.error(&e),
        },
        ConsoleCommand::Stop => {
            if recorder.controller.is_capturing() {
                stop_recording(recorder, presenter).await;
            } else if let Err(e) = recorder.finish().await {
                // A capture that failed on its own is reported here
                presenter.error(&e);
            } else {
                presenter.warn("Not recording");
            }
        }
        ConsoleCommand::Save => match recorder.save().await {
            Ok(0) => presenter.info("Nothing to save"),
            Ok(count) => presenter.success(&format!(
                "Saved {} recording(s) to {}",
                count,
                recorder.output_dir.display()
            )),
            Err(e) => presenter.error(&e),
        },
        ConsoleCommand::Clear => {
            let count = recorder.store().size();
            recorder.store().clear();
            presenter.success(&format!("Cleared {} recording(s)", count));
        }
        ConsoleCommand::Count => presenter.output(&recorder.store().size().to_string()),
        ConsoleCommand::List => {
            let recordings = recorder.store().recordings();
            if recordings.is_empty() {
                presenter.info("No recordings");
            }
            for (i, recording) in recordings.iter().enumerate() {
                presenter.recording_line(i + 1, recording);
            }
        }
        ConsoleCommand::Help => presenter.output(CONSOLE_HELP),
        ConsoleCommand::Quit | ConsoleCommand::Empty => {}
    }
}

async fn stop_recording(recorder: &Recorder, presenter: &Presenter) {
    match recorder.finish().await {
        Ok(()) => presenter.success(&format!(
            "Stopped. {} recording(s) buffered",
            recorder.store().size()
        )),
        Err(e) => presenter.error(&e),
    }
}

/// Record once until Ctrl+C or `limit`, then save
pub async fn run_record(config: AppConfig, name: Option<String>, limit: Option<Duration>) -> ExitCode {
    let mut presenter = Presenter::new();

    let recorder = match Recorder::from_config(&config) {
        Ok(recorder) => recorder,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let mut interrupts = InterruptSignal::listen();

    let name = match recorder.start(name).await {
        Ok(name) => name,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let started = Instant::now();
    let status = presenter.format_recording(&name, Duration::ZERO, limit);
    presenter.start_spinner(&status);
    let mut ticker = tokio::time::interval(TICK);

    loop {
        tokio::select! {
            _ = interrupts.recv() => break,
            _ = ticker.tick() => {
                let elapsed = started.elapsed();
                if limit.is_some_and(|limit| elapsed >= limit) {
                    break;
                }
                // The worker ends on its own when the device fails
                if !recorder.controller.is_capturing() {
                    break;
                }
                presenter.update_spinner(&presenter.format_recording(&name, elapsed, limit));
            }
        }
    }

    if let Err(e) = recorder.finish().await {
        presenter.spinner_fail(&e);
        return ExitCode::from(EXIT_ERROR);
    }
    presenter.spinner_success(&format!(
        "Recorded {} ({})",
        name,
        format_clock(started.elapsed())
    ));

    match recorder.save().await {
        Ok(_) => {
            presenter.output(&recorder.output_dir.join(&name).to_string_lossy());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print the names of the available input devices
pub fn run_devices() -> ExitCode {
    let presenter = Presenter::new();
    match CpalAudioInput::device_names() {
        Ok(names) if names.is_empty() => {
            presenter.warn("No audio input devices found");
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(names) => {
            for name in names {
                presenter.output(&name);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|e| {
        log::warn!("Ignoring config file {}: {}", store.path().display(), e);
        AppConfig::empty()
    });

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}
