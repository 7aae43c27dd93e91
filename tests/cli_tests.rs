//! CLI integration tests

use std::io::Write;
use std::process::{Command, Stdio};

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn pcm_recorder_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pcm-recorder"))
}

/// Binary with its config dir pointed at an empty temp directory
fn isolated(config_home: &TempDir) -> Command {
    let mut cmd = pcm_recorder_bin();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_output() {
    let output = pcm_recorder_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("WAV"));
    assert!(stdout.contains("--channels"));
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--rate"));
    assert!(stdout.contains("--output-dir"));
    assert!(stdout.contains("--input"));
    assert!(stdout.contains("record"));
    assert!(stdout.contains("devices"));
}

#[test]
fn version_output() {
    let output = pcm_recorder_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pcm-recorder"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn record_help() {
    pcm_recorder_bin()
        .args(["record", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--name").and(predicate::str::contains("--duration")));
}

#[test]
#[cfg(target_os = "linux")]
fn config_path_command() {
    let home = tempfile::tempdir().unwrap();
    let output = isolated(&home)
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pcm-recorder"));
    assert!(stdout.contains("config.toml"));
    assert!(stdout.starts_with(&*home.path().to_string_lossy()));
}

#[test]
fn config_help() {
    let output = pcm_recorder_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
#[cfg(target_os = "linux")]
fn config_set_then_get() {
    let home = tempfile::tempdir().unwrap();

    isolated(&home)
        .args(["config", "set", "format", "24-bit int"])
        .assert()
        .success();

    isolated(&home)
        .args(["config", "get", "format"])
        .assert()
        .success()
        .stdout(predicate::str::diff("int24\n"));

    isolated(&home)
        .args(["config", "get", "sample_rate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
#[cfg(target_os = "linux")]
fn record_with_silent_input_writes_wav() {
    let home = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let output = isolated(&home)
        .args(["--input", "silence", "record", "--name", "t1", "--duration", "1s"])
        .arg("--output-dir")
        .arg(out.path())
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let path = out.path().join("t1.wav");
    assert!(path.exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("t1.wav"));

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().sample_rate, 16000);
    assert_eq!(reader.spec().bits_per_sample, 16);
    // 1600 frames per 100ms chunk
    assert!(reader.len() >= 1600 * 5);
    assert_eq!(reader.len() % 1600, 0);
}

#[test]
#[cfg(target_os = "linux")]
fn console_session_from_stdin() {
    let home = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let mut child = isolated(&home)
        .args(["--input", "silence", "--rate", "8000", "--output-dir"])
        .arg(out.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn console");

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin
            .write_all(b"record first\nstop\ncount\nrecord second\nstop\nsave\nquit\n")
            .unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line == "1"));
    assert!(out.path().join("first.wav").exists());
    assert!(out.path().join("second.wav").exists());
}

#[test]
#[cfg(target_os = "linux")]
fn console_reports_unknown_command() {
    let home = tempfile::tempdir().unwrap();

    assert_cmd::Command::from_std(isolated(&home))
        .args(["--input", "silence"])
        .write_stdin("play\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command"));
}
