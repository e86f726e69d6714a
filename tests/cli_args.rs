//! Tests for the binary: argument parsing and a full relay session.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn cmdrelay_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cmdrelay"));
    cmd.arg("--config")
        .arg(config_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn run_with_input(args: &[&str], input: &str) -> Output {
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    let mut child = cmdrelay_cmd(&config_dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().expect("Failed to wait for command")
}

#[test]
fn test_help_shows_relay_options() {
    let output = Command::new(env!("CARGO_BIN_EXE_cmdrelay"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--no-repeat"));
    assert!(stdout.contains("Turn off ENTER key repeats last command"));
    assert!(stdout.contains("--script"));
    assert!(stdout.contains("PROGRAM"));
}

#[test]
fn test_missing_program_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_cmdrelay"))
        .arg("-v")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PROGRAM"));
}

#[test]
fn test_missing_script_is_reported() {
    let output = run_with_input(&["--script", "/nonexistent/cmdrelay.ini", "cat"], "");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot open script"), "stderr: {stderr}");
}

#[cfg(unix)]
#[test]
fn test_unknown_program_fails_to_start() {
    let output = run_with_input(&["--no-script", "cmdrelay-no-such-program-xyz"], "");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cannot start cmdrelay-no-such-program-xyz"),
        "stderr: {stderr}"
    );
}

#[cfg(unix)]
#[test]
fn test_relays_aliases_to_child() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.txt");
    let capture = format!("cat > '{}'", out.display());
    let output = run_with_input(
        &["--no-script", "sh", "-c", &capture],
        "alias greet=hello\ngreet world\n\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("EOF, exiting..."), "stdout: {stdout}");
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "hello world\nhello world\n"
    );
}

#[cfg(unix)]
#[test]
fn test_script_runs_before_stdin() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("init.ini");
    std::fs::write(&script, "# comment\nalias say=echo-from-script\nsay one\n").unwrap();

    let output = run_with_input(
        &["--script", script.to_str().unwrap(), "cat"],
        "say two\nexit\nnever\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("reading commands from"), "stdout: {stdout}");
    assert!(stdout.contains("echo-from-script one\n"), "stdout: {stdout}");
    assert!(stdout.contains("echo-from-script two\n"), "stdout: {stdout}");
    assert!(!stdout.contains("never"), "stdout: {stdout}");
    assert!(!stdout.contains("comment"), "stdout: {stdout}");
}

#[cfg(unix)]
#[test]
fn test_no_repeat_flag_sends_blank_line() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.txt");
    let capture = format!("cat > '{}'", out.display());
    let output = run_with_input(&["-r", "--no-script", "sh", "-c", &capture], "tick\n\n");
    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "tick\n\n");
}

#[test]
fn test_overlong_line_is_reported_on_stderr() {
    let input = format!("{}\n", "x".repeat(2000));
    let output = run_with_input(&["--no-script", "cat"], &input);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cmdrelay: line too long, resetting input"),
        "stderr: {stderr}"
    );
    assert!(!stdout.contains("line too long"), "stdout: {stdout}");
}

#[cfg(unix)]
#[test]
fn test_child_exit_interrupts_blocked_read() {
    let config_dir = TempDir::new().unwrap();
    let started = Instant::now();
    let mut relay = cmdrelay_cmd(&config_dir)
        .args(["--no-script", "sh", "-c", "sleep 0.2"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    // Stdin stays open: only the child's exit can end the blocked read.
    let stdin = relay.stdin.take().unwrap();
    let deadline = started + Duration::from_secs(5);
    while relay.try_wait().unwrap().is_none() {
        assert!(Instant::now() < deadline, "relay stayed blocked on input");
        thread::sleep(Duration::from_millis(10));
    }
    let elapsed = started.elapsed();
    drop(stdin);

    let output = relay.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(
        elapsed < Duration::from_secs(1),
        "child exit noticed after {elapsed:?}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("sh is no longer running, exiting..."),
        "stdout: {stdout}"
    );
}
