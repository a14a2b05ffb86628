/*!
This module defines the `Config` struct, which locates the project's
artifacts. Every field is optional; the defaults describe the standard
project layout relative to the project root.
*/

use anyhow::{Context, Result};
use std::{
	path::{Path, PathBuf},
	time::Duration,
};

#[derive(Debug, Default, serde::Deserialize)]
pub struct Config {
	pub root: Option<PathBuf>,
	pub dataset_path: Option<PathBuf>,
	pub target_column_name: Option<String>,
	pub model_path: Option<PathBuf>,
	pub model_cv_path: Option<PathBuf>,
	pub notebook_paths: Option<Vec<PathBuf>>,
	pub survey_directories: Option<Vec<String>>,
	pub probe_timeout_secs: Option<u64>,
}

const DEFAULT_NOTEBOOK_PATHS: &[&str] = &[
	"notebooks/1_model_leakage_demo.ipynb",
	"notebooks/2_model_pipeline_cv.ipynb",
	"notebooks/3_data_drift_monitoring.ipynb",
];

const DEFAULT_SURVEY_DIRECTORIES: &[&str] =
	&["app", "dashboard", "docker", "k8s", "notebooks", "scripts"];

impl Config {
	pub fn from_path(config_path: &Path) -> Result<Self> {
		let config = std::fs::read_to_string(config_path)
			.with_context(|| format!("failed to read config file {}", config_path.display()))?;
		let config = serde_yaml::from_str(&config)
			.with_context(|| format!("failed to parse config file {}", config_path.display()))?;
		Ok(config)
	}

	pub fn root(&self) -> &Path {
		self.root.as_deref().unwrap_or_else(|| Path::new("."))
	}

	pub fn dataset_path(&self) -> PathBuf {
		self.join(self.dataset_path.as_deref().unwrap_or_else(|| Path::new("heart.csv")))
	}

	pub fn target_column_name(&self) -> &str {
		self.target_column_name.as_deref().unwrap_or("HeartDisease")
	}

	/// The deployed model artifact.
	pub fn model_path(&self) -> PathBuf {
		self.join(
			self.model_path
				.as_deref()
				.unwrap_or_else(|| Path::new("app/model.cardio")),
		)
	}

	/// The cross-validated model artifact.
	pub fn model_cv_path(&self) -> PathBuf {
		self.join(
			self.model_cv_path
				.as_deref()
				.unwrap_or_else(|| Path::new("app/model_cv.cardio")),
		)
	}

	pub fn notebook_paths(&self) -> Vec<PathBuf> {
		match &self.notebook_paths {
			Some(paths) => paths.iter().map(|path| self.join(path)).collect(),
			None => DEFAULT_NOTEBOOK_PATHS
				.iter()
				.map(|path| self.join(Path::new(path)))
				.collect(),
		}
	}

	pub fn survey_directories(&self) -> Vec<String> {
		match &self.survey_directories {
			Some(directories) => directories.clone(),
			None => DEFAULT_SURVEY_DIRECTORIES
				.iter()
				.map(|directory| (*directory).to_owned())
				.collect(),
		}
	}

	pub fn survey_directory_path(&self, name: &str) -> PathBuf {
		self.root().join(name)
	}

	pub fn probe_timeout(&self) -> Duration {
		Duration::from_secs(self.probe_timeout_secs.unwrap_or(5))
	}

	fn join(&self, path: &Path) -> PathBuf {
		if path.is_absolute() {
			path.to_owned()
		} else {
			self.root().join(path)
		}
	}
}

#[test]
fn test_defaults() {
	let config = Config::default();
	assert_eq!(config.dataset_path(), Path::new("./heart.csv"));
	assert_eq!(config.target_column_name(), "HeartDisease");
	assert_eq!(config.model_path(), Path::new("./app/model.cardio"));
	assert_eq!(config.notebook_paths().len(), 3);
	assert_eq!(config.survey_directories().len(), 6);
	assert_eq!(config.probe_timeout(), Duration::from_secs(5));
}

#[test]
fn test_from_yaml() {
	let yaml = "root: /srv/project\ntarget_column_name: Outcome\nprobe_timeout_secs: 1\n";
	let config: Config = serde_yaml::from_str(yaml).unwrap();
	assert_eq!(config.root(), Path::new("/srv/project"));
	assert_eq!(config.dataset_path(), Path::new("/srv/project/heart.csv"));
	assert_eq!(config.target_column_name(), "Outcome");
	assert_eq!(config.probe_timeout(), Duration::from_secs(1));
}
