//! pcm-recorder - microphone capture to in-memory takes saved as PCM WAV
//!
//! This crate provides a background capture pipeline that reads the input
//! device in 100ms chunks, keeps finished recordings in memory, and writes
//! them out as WAV files on request.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Audio parameters, recordings, the capture state machine, config and errors
//! - **Application**: Capture controller, recording store, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal input, hound WAV writer, XDG config)
//! - **CLI**: Argument parsing, interactive console, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
