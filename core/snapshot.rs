use crate::{
	artifact::{self, ModelDescriptor},
	config::Config,
	dataset::{self, DatasetSummary},
	error::Error,
	notebook::{self, NotebookSummary},
	reference::{self, Achievement, LeaderboardEntry, LeakageComparison, ProjectStage},
	survey::{self, DirectoryEntry},
	system::{self, SystemStatus},
};
use std::collections::BTreeMap;

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
	pub dataset_info: DatasetSummary,
	pub model: ModelDescriptor,
	pub model_results: Vec<LeaderboardEntry>,
	pub leakage: LeakageComparison,
	pub notebooks: Vec<NotebookSummary>,
	pub directories: BTreeMap<String, Vec<DirectoryEntry>>,
	pub system: SystemStatus,
	pub achievements: Vec<Achievement>,
	pub project_stages: Vec<ProjectStage>,
}

/// Assemble a fresh snapshot from the current on-disk and environment
/// state. Dataset and model load failures are structural and propagate;
/// every other section degrades within its own field, so a missing notebook
/// or an unreachable tool never takes the snapshot down.
pub fn build_snapshot(config: &Config) -> Result<Snapshot, Error> {
	let dataset_info = dataset::load_dataset(config)?;
	let model = artifact::load_model(&config.model_path())?;
	let model = artifact::describe_model(&model);
	let model_results = reference::leaderboard();
	let leakage = reference::leakage_comparison();
	let notebooks = notebook::summarize_all(config);
	let directories = survey::survey(config);
	let system = system::check_system(config);
	let achievements = reference::achievements();
	let project_stages = reference::project_stages();
	Ok(Snapshot {
		dataset_info,
		model,
		model_results,
		leakage,
		notebooks,
		directories,
		system,
		achievements,
		project_stages,
	})
}
