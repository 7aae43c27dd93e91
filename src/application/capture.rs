//! Capture controller: runs one background capture at a time

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use chrono::Local;
use thiserror::Error;

use crate::domain::audio::AudioParameters;
use crate::domain::recording::{recording_name, Recording, RecordingBuffer};
use crate::domain::session::{CaptureSession, CaptureState, InvalidStateTransition, StopSignal};

use super::ports::{AudioInput, AudioInputError, InputStream};
use super::store::RecordingStore;

/// Errors from the capture controller
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Could not open audio device: {0}")]
    DeviceOpen(String),

    #[error("Audio device failed during capture: {0}")]
    DeviceRead(String),

    #[error("{0}")]
    InvalidState(#[from] InvalidStateTransition),

    #[error("Capture worker failed: {0}")]
    Worker(String),

    /// A finished capture failed and nobody waited for it. The new capture
    /// was not started.
    #[error("Previous capture failed: {0}")]
    PreviousCapture(Box<CaptureError>),
}

impl From<AudioInputError> for CaptureError {
    fn from(err: AudioInputError) -> Self {
        match err {
            AudioInputError::DeviceRead(msg) => Self::DeviceRead(msg),
            AudioInputError::DeviceOpen(msg) => Self::DeviceOpen(msg),
            other => Self::DeviceOpen(other.to_string()),
        }
    }
}

type Worker = JoinHandle<Result<(), CaptureError>>;

/// Owns the capture lifecycle and the store finished recordings go to.
///
/// `start` hands the capture to a dedicated thread and returns as soon as the
/// device is open. The worker reads 100ms chunks until `stop` raises the
/// session's signal, then appends the finished recording to the store.
pub struct CaptureController<A: AudioInput + 'static> {
    input: Arc<A>,
    store: RecordingStore,
    session: Arc<Mutex<CaptureSession>>,
    stop_signal: Arc<Mutex<StopSignal>>,
    worker: Mutex<Option<Worker>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl<A: AudioInput + 'static> CaptureController<A> {
    pub fn new(input: A, store: RecordingStore) -> Self {
        Self {
            input: Arc::new(input),
            store,
            session: Arc::new(Mutex::new(CaptureSession::new())),
            stop_signal: Arc::new(Mutex::new(StopSignal::new())),
            worker: Mutex::new(None),
        }
    }

    /// Store that receives finished recordings
    pub fn store(&self) -> &RecordingStore {
        &self.store
    }

    pub fn state(&self) -> CaptureState {
        lock(&self.session).state()
    }

    pub fn is_capturing(&self) -> bool {
        lock(&self.session).is_capturing()
    }

    /// Begin a capture on a background thread.
    ///
    /// Blocks only until the device has been opened. Returns the file name
    /// the recording will be stored under.
    pub fn start(&self, name: Option<&str>, params: AudioParameters) -> Result<String, CaptureError> {
        let signal = StopSignal::new();
        {
            // stop() takes the session lock first, so it never sees the old signal
            let mut session = lock(&self.session);
            session.begin()?;
            *lock(&self.stop_signal) = signal.clone();
        }

        if let Err(e) = self.wait() {
            log::warn!("Previous capture ended with an error: {}", e);
            let _ = lock(&self.session).abort();
            return Err(CaptureError::PreviousCapture(Box::new(e)));
        }

        let name = recording_name(name, &Local::now());

        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), CaptureError>>(1);
        let job = CaptureJob {
            name: name.clone(),
            params,
            signal,
            input: Arc::clone(&self.input),
            store: self.store.clone(),
            session: Arc::clone(&self.session),
            stop_slot: Arc::clone(&self.stop_signal),
        };

        let spawned = thread::Builder::new()
            .name("pcm-capture".into())
            .spawn(move || job.run(ready_tx));
        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                let _ = lock(&self.session).abort();
                return Err(CaptureError::Worker(e.to_string()));
            }
        };

        match ready_rx.recv() {
            Ok(Ok(())) => {
                log::info!("Capturing {} ({})", name, params);
                *lock(&self.worker) = Some(handle);
                Ok(name)
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                // Worker dropped the channel without reporting: it panicked
                let _ = handle.join();
                let _ = lock(&self.session).abort();
                Err(CaptureError::Worker(
                    "capture thread exited before opening the device".to_string(),
                ))
            }
        }
    }

    /// Ask the running capture to finish. Safe to call repeatedly or while idle.
    ///
    /// Takes effect once the pending device read returns (at most one chunk).
    pub fn stop(&self) {
        let _session = lock(&self.session);
        lock(&self.stop_signal).trigger();
    }

    /// Wait for the most recent capture to finish and report how it ended.
    ///
    /// Returns `Ok(())` when there is nothing to wait for.
    pub fn wait(&self) -> Result<(), CaptureError> {
        let handle = lock(&self.worker).take();
        match handle {
            Some(handle) => handle
                .join()
                .map_err(|_| CaptureError::Worker("capture thread panicked".to_string()))?,
            None => Ok(()),
        }
    }
}

impl<A: AudioInput + 'static> Drop for CaptureController<A> {
    fn drop(&mut self) {
        self.stop();
        let _ = self.wait();
    }
}

/// Everything the worker thread owns for one session
struct CaptureJob<A: AudioInput + 'static> {
    name: String,
    params: AudioParameters,
    signal: StopSignal,
    input: Arc<A>,
    store: RecordingStore,
    session: Arc<Mutex<CaptureSession>>,
    stop_slot: Arc<Mutex<StopSignal>>,
}

impl<A: AudioInput + 'static> CaptureJob<A> {
    fn run(self, ready: mpsc::SyncSender<Result<(), CaptureError>>) -> Result<(), CaptureError> {
        let stream = match self.input.open(&self.params) {
            Ok(stream) => stream,
            Err(e) => {
                let err = match e {
                    AudioInputError::DeviceOpen(msg) => CaptureError::DeviceOpen(msg),
                    other => CaptureError::DeviceOpen(other.to_string()),
                };
                log::error!("{}", err);
                let _ = lock(&self.session).abort();
                let _ = ready.send(Err(err.clone()));
                return Err(err);
            }
        };
        let _ = ready.send(Ok(()));

        let buffer = match self.capture(stream) {
            Ok(buffer) => buffer,
            Err(e) => {
                log::error!("Capture of {} aborted: {}", self.name, e);
                let _ = lock(&self.session).abort();
                return Err(e);
            }
        };

        lock(&self.session).finalize()?;
        let chunks = buffer.chunk_count();
        let recording = Recording::new(self.name, buffer.into_samples(), self.params);
        log::info!(
            "Captured {} ({} chunks, {:.1}s)",
            recording.name(),
            chunks,
            recording.duration().as_secs_f64()
        );
        self.store.append(recording);

        *lock(&self.stop_slot) = StopSignal::new();
        lock(&self.session).complete()?;
        Ok(())
    }

    /// Read chunks until the stop signal is raised. The stream is closed on
    /// every path out of this function.
    fn capture(&self, mut stream: Box<dyn InputStream>) -> Result<RecordingBuffer, CaptureError> {
        let mut buffer = RecordingBuffer::new();

        while !self.signal.is_triggered() {
            match stream.read_chunk() {
                Ok(chunk) => buffer.push(chunk),
                Err(e) => {
                    if let Err(close_err) = stream.close() {
                        log::warn!("Failed to close stream after read error: {}", close_err);
                    }
                    return Err(e.into());
                }
            }
        }

        stream.close()?;
        Ok(buffer)
    }
}
