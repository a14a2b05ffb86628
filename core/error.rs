use std::path::PathBuf;

/// The failure taxonomy of the aggregation engine.
///
/// Dataset and model load failures are structural: the snapshot cannot be
/// meaningfully completed, so they propagate to the caller. Every other
/// failure stays local to its snapshot field and is recorded there (or in
/// the log) instead of aborting assembly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("artifact not found: {}", .0.display())]
	ArtifactNotFound(PathBuf),
	#[error("failed to parse artifact {}: {}", .path.display(), .message)]
	ArtifactParse { path: PathBuf, message: String },
	#[error("failed to deserialize artifact {}: {}", .path.display(), .message)]
	ArtifactDeserialize { path: PathBuf, message: String },
	#[error("environment probe failed: {0}")]
	EnvironmentProbe(String),
	#[error("input has {actual} values but the model expects {expected}")]
	InputShapeMismatch { expected: usize, actual: usize },
}
