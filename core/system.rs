use crate::{config::Config, error::Error};
use cardio_util::process::run_with_timeout;
use std::{path::Path, process::Command, time::Duration};

#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SystemStatus {
	pub docker: bool,
	pub kubectl: bool,
	pub model: bool,
	pub model_cv: bool,
	pub dataset: bool,
}

/// Probe the deployment environment. Every sub-check is failure isolated: a
/// tool that is missing, hangs, or exits non-zero turns its flag false and
/// never aborts the probe.
pub fn check_system(config: &Config) -> SystemStatus {
	let timeout = config.probe_timeout();
	SystemStatus {
		docker: tool_available("docker", &["--version"], timeout),
		kubectl: tool_available("kubectl", &["version", "--client"], timeout),
		model: artifact_present(&config.model_path()),
		model_cv: artifact_present(&config.model_cv_path()),
		dataset: artifact_present(&config.dataset_path()),
	}
}

/// `true` when invoking the tool with its version query exits zero within
/// the timeout.
fn tool_available(program: &str, args: &[&str], timeout: Duration) -> bool {
	let mut command = Command::new(program);
	command.args(args);
	match run_with_timeout(&mut command, timeout) {
		Ok(status) => status.success(),
		Err(error) => {
			let error = Error::EnvironmentProbe(format!("{}: {}", program, error));
			tracing::warn!("{}", error);
			false
		}
	}
}

/// A path counts as present only when it exists and has nonzero size. A
/// zero byte file is treated as absent, guarding against a prior partial
/// write.
pub fn artifact_present(path: &Path) -> bool {
	std::fs::metadata(path)
		.map(|metadata| metadata.is_file() && metadata.len() > 0)
		.unwrap_or(false)
}

#[test]
fn test_artifact_present() {
	let dir = tempfile::tempdir().unwrap();
	let missing = dir.path().join("missing.bin");
	assert!(!artifact_present(&missing));
	let empty = dir.path().join("empty.bin");
	std::fs::write(&empty, "").unwrap();
	assert!(!artifact_present(&empty));
	let full = dir.path().join("full.bin");
	std::fs::write(&full, "data").unwrap();
	assert!(artifact_present(&full));
}

#[test]
fn test_tool_available_missing_tool() {
	assert!(!tool_available(
		"definitely-not-a-real-tool",
		&["--version"],
		Duration::from_secs(1),
	));
}

#[test]
fn test_check_system_with_empty_root() {
	let dir = tempfile::tempdir().unwrap();
	let config = Config {
		root: Some(dir.path().to_owned()),
		probe_timeout_secs: Some(1),
		..Config::default()
	};
	let status = check_system(&config);
	assert!(!status.model);
	assert!(!status.model_cv);
	assert!(!status.dataset);
}
