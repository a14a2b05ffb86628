use anyhow::{format_err, Result};
use std::{
	process::{Command, ExitStatus, Stdio},
	thread::sleep,
	time::{Duration, Instant},
};

/// Run `command` to completion, killing it if it outlives `timeout`.
///
/// Stdio is discarded. The child is always reaped, including on the timeout
/// path, so no zombie is left behind.
pub fn run_with_timeout(command: &mut Command, timeout: Duration) -> Result<ExitStatus> {
	let mut child = command
		.stdin(Stdio::null())
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.spawn()?;
	let deadline = Instant::now() + timeout;
	loop {
		if let Some(status) = child.try_wait()? {
			return Ok(status);
		}
		if Instant::now() >= deadline {
			child.kill().ok();
			child.wait()?;
			return Err(format_err!(
				"command did not exit within {}ms",
				timeout.as_millis()
			));
		}
		sleep(Duration::from_millis(10));
	}
}

#[cfg(unix)]
#[test]
fn test_run_with_timeout_exit_codes() {
	let status = run_with_timeout(&mut Command::new("true"), Duration::from_secs(5)).unwrap();
	assert!(status.success());
	let status = run_with_timeout(&mut Command::new("false"), Duration::from_secs(5)).unwrap();
	assert!(!status.success());
}

#[cfg(unix)]
#[test]
fn test_run_with_timeout_kills_stuck_child() {
	let mut command = Command::new("sleep");
	command.arg("5");
	let start = Instant::now();
	let result = run_with_timeout(&mut command, Duration::from_millis(100));
	assert!(result.is_err());
	assert!(start.elapsed() < Duration::from_secs(4));
}

#[test]
fn test_run_with_timeout_missing_program() {
	let result = run_with_timeout(
		&mut Command::new("definitely-not-a-real-program"),
		Duration::from_secs(1),
	);
	assert!(result.is_err());
}
