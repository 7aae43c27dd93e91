//! Error scenario integration tests

use std::process::Command;

fn pcm_recorder_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pcm-recorder"));
    // Keep the user's config file out of the way
    cmd.env("XDG_CONFIG_HOME", "/nonexistent")
        .env("HOME", "/nonexistent");
    cmd
}

#[test]
fn invalid_format_is_usage_error() {
    let output = pcm_recorder_bin()
        .args(["--input", "silence", "--format", "mp3", "record"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid sample format"),
        "Expected error about sample format, got: {}",
        stderr
    );
}

#[test]
fn invalid_channel_count_is_usage_error() {
    let output = pcm_recorder_bin()
        .args(["--input", "silence", "--channels", "6", "record"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("channel"),
        "Expected error about channel count, got: {}",
        stderr
    );
}

#[test]
fn unusable_sample_rate_is_usage_error() {
    let output = pcm_recorder_bin()
        .args(["--input", "silence", "--rate", "5", "record"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("sample rate"),
        "Expected error about sample rate, got: {}",
        stderr
    );
}

#[test]
fn unknown_input_is_usage_error() {
    let output = pcm_recorder_bin()
        .args(["--input", "pulse", "record"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("pulse"),
        "Expected error naming the input, got: {}",
        stderr
    );
}

#[test]
fn invalid_duration_error() {
    let output = pcm_recorder_bin()
        .args(["--input", "silence", "record", "--duration", "soon"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid duration"),
        "Expected error about invalid duration, got: {}",
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    let output = pcm_recorder_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let output = pcm_recorder_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_format() {
    let output = pcm_recorder_bin()
        .args(["config", "set", "format", "mp3"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("format"),
        "Expected error about invalid format, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_input() {
    let output = pcm_recorder_bin()
        .args(["config", "set", "input", "jack"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cpal") && stderr.contains("silence"),
        "Expected the valid inputs to be listed, got: {}",
        stderr
    );
}

#[test]
fn config_list_with_no_file() {
    let output = pcm_recorder_bin()
        .args(["config", "list"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("sample_rate") && stdout.contains("not set"),
        "Expected config list output, got: {}",
        stdout
    );
}
