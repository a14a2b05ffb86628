/*!
The read-only query operations exposed to the presentation layer. Each is a
pure function of on-disk and environment state returning a serializable
structure.
*/

use crate::{
	artifact,
	config::Config,
	dataset,
	error::Error,
	notebook::{self, NotebookSummary},
	reference, snapshot,
	system::{self, SystemStatus},
};
use cardio_dataframe::Value;
use cardio_model::predict::{predict, PredictError, PredictOutput};

const SAMPLE_ROWS: usize = 10;

#[derive(serde::Serialize, Debug)]
#[serde(untagged)]
pub enum ProjectData {
	Snapshot(Box<snapshot::Snapshot>),
	Error(ErrorDescriptor),
}

#[derive(serde::Serialize, Debug)]
pub struct ErrorDescriptor {
	pub error: String,
}

/// The full project snapshot, or a minimal error descriptor when the
/// dataset or model cannot be loaded.
pub fn project_data(config: &Config) -> ProjectData {
	match snapshot::build_snapshot(config) {
		Ok(snapshot) => ProjectData::Snapshot(Box::new(snapshot)),
		Err(error) => {
			tracing::warn!("failed to build the project snapshot: {}", error);
			ProjectData::Error(ErrorDescriptor {
				error: error.to_string(),
			})
		}
	}
}

pub fn system_status(config: &Config) -> SystemStatus {
	system::check_system(config)
}

pub fn notebook_summaries(config: &Config) -> Vec<NotebookSummary> {
	notebook::summarize_all(config)
}

#[derive(serde::Serialize, Debug)]
pub struct DatasetSample {
	pub columns: Vec<String>,
	pub sample: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// The first rows of the dataset as JSON records.
pub fn dataset_sample(config: &Config) -> Result<DatasetSample, Error> {
	let dataframe = dataset::load_dataframe(config)?;
	let columns: Vec<String> = dataframe
		.columns
		.iter()
		.map(|column| column.name().to_owned())
		.collect();
	let n_rows = dataframe.nrows().min(SAMPLE_ROWS);
	let mut sample = Vec::with_capacity(n_rows);
	for index in 0..n_rows {
		let mut record = serde_json::Map::new();
		for column in dataframe.columns.iter() {
			let value = match column.value(index) {
				Value::Unknown => serde_json::Value::Null,
				Value::Number(value) => serde_json::Number::from_f64(value as f64)
					.map(serde_json::Value::Number)
					.unwrap_or(serde_json::Value::Null),
				Value::Enum(option) => option
					.map(|option| serde_json::Value::String(option.to_owned()))
					.unwrap_or(serde_json::Value::Null),
				Value::Text(text) => serde_json::Value::String(text.to_owned()),
			};
			record.insert(column.name().to_owned(), value);
		}
		sample.push(record);
	}
	Ok(DatasetSample { columns, sample })
}

/// Diagnostic inference with the canonical test patient.
pub fn test_inference(config: &Config) -> Result<PredictOutput, Error> {
	test_inference_with(config, &reference::test_patient())
}

/// Diagnostic inference against the deployed artifact. Unlike the snapshot
/// sections this operation surfaces its error directly: it is a health
/// check, not a dashboard field.
pub fn test_inference_with(config: &Config, input: &[f32]) -> Result<PredictOutput, Error> {
	let model_path = config.model_path();
	let model = artifact::load_model(&model_path)?;
	predict(&model, input).map_err(|error| match error {
		PredictError::ShapeMismatch { expected, actual } => {
			Error::InputShapeMismatch { expected, actual }
		}
		error => Error::ArtifactDeserialize {
			path: model_path,
			message: error.to_string(),
		},
	})
}

#[cfg(test)]
fn setup_project(dir: &std::path::Path) -> Config {
	let csv = "Age,Sex,HeartDisease\n\
		40,M,0\n\
		49,F,1\n\
		37,M,0\n\
		48,F,1\n\
		54,M,0\n\
		39,M,0\n\
		45,F,1\n\
		54,M,1\n\
		37,M,0\n\
		48,F,0\n";
	std::fs::write(dir.join("heart.csv"), csv).unwrap();
	std::fs::create_dir(dir.join("app")).unwrap();
	artifact::test_model()
		.to_file(&dir.join("app/model.cardio"))
		.unwrap();
	Config {
		root: Some(dir.to_owned()),
		probe_timeout_secs: Some(1),
		..Config::default()
	}
}

#[test]
fn test_project_data_end_to_end() {
	let dir = tempfile::tempdir().unwrap();
	let config = setup_project(dir.path());
	let snapshot = match snapshot::build_snapshot(&config) {
		Ok(snapshot) => snapshot,
		Err(error) => panic!("snapshot failed: {}", error),
	};
	assert_eq!(snapshot.dataset_info.rows, 10);
	assert_eq!(snapshot.dataset_info.columns, 3);
	assert_eq!(
		snapshot.dataset_info.numeric_features,
		vec!["Age".to_owned()]
	);
	assert_eq!(
		snapshot.dataset_info.categorical_features,
		vec!["Sex".to_owned()]
	);
	assert_eq!(snapshot.model.model_type, "LinearBinaryClassifier");
	assert_eq!(snapshot.model_results.len(), 5);
	// Notebooks are absent in this project root, so each summary degrades
	// to its own error preview instead of failing the snapshot.
	assert_eq!(snapshot.notebooks.len(), 3);
	for summary in snapshot.notebooks.iter() {
		assert_eq!(summary.cell_count, 1);
		assert!(summary.previews[0].starts_with("[ERROR]"));
	}
	assert_eq!(snapshot.directories.len(), 6);
	assert_eq!(
		snapshot.directories["docker"][0].kind,
		crate::survey::EntryKind::Missing
	);
	assert!(!snapshot.directories["app"].is_empty());
	assert!(snapshot.system.model);
	assert!(snapshot.system.dataset);
	assert!(!snapshot.system.model_cv);
	assert_eq!(snapshot.project_stages.len(), 6);
}

#[test]
fn test_project_data_error_descriptor() {
	let dir = tempfile::tempdir().unwrap();
	let config = Config {
		root: Some(dir.path().to_owned()),
		..Config::default()
	};
	match project_data(&config) {
		ProjectData::Error(descriptor) => {
			assert!(descriptor.error.contains("artifact not found"));
		}
		ProjectData::Snapshot(_) => panic!("expected an error descriptor"),
	}
}

#[test]
fn test_snapshot_is_idempotent() {
	let dir = tempfile::tempdir().unwrap();
	let config = setup_project(dir.path());
	let first = snapshot::build_snapshot(&config).unwrap();
	let second = snapshot::build_snapshot(&config).unwrap();
	// External process timing must not affect any field; compare everything
	// but the system booleans, which depend on tools outside the project
	// root, then the system booleans on their own.
	assert_eq!(first.dataset_info, second.dataset_info);
	assert_eq!(first.model, second.model);
	assert_eq!(first.model_results, second.model_results);
	assert_eq!(first.leakage, second.leakage);
	assert_eq!(first.notebooks, second.notebooks);
	assert_eq!(first.directories, second.directories);
	assert_eq!(first.system, second.system);
	assert_eq!(first.achievements, second.achievements);
	assert_eq!(first.project_stages, second.project_stages);
}

#[test]
fn test_dataset_sample() {
	let dir = tempfile::tempdir().unwrap();
	let config = setup_project(dir.path());
	let sample = dataset_sample(&config).unwrap();
	assert_eq!(
		sample.columns,
		vec!["Age".to_owned(), "Sex".to_owned(), "HeartDisease".to_owned()]
	);
	assert_eq!(sample.sample.len(), 10);
	assert_eq!(
		sample.sample[0]["Age"],
		serde_json::Value::Number(serde_json::Number::from_f64(40.0).unwrap())
	);
	assert_eq!(
		sample.sample[1]["Sex"],
		serde_json::Value::String("F".to_owned())
	);
}

#[test]
fn test_test_inference() {
	let dir = tempfile::tempdir().unwrap();
	let config = setup_project(dir.path());
	// Age 60, male: logit = -0.5 + 0.8 * 1.0 + 0.9 = 1.2, positive class.
	let output = test_inference_with(&config, &[60.0, 1.0]).unwrap();
	match output {
		PredictOutput::BinaryClassification(output) => {
			assert_eq!(output.class_name, "1");
			assert!(output.probability > 0.5);
		}
		_ => panic!("expected a binary classification output"),
	}
}

#[test]
fn test_test_inference_shape_mismatch() {
	let dir = tempfile::tempdir().unwrap();
	let config = setup_project(dir.path());
	let result = test_inference_with(&config, &[45.0]);
	match result {
		Err(Error::InputShapeMismatch { expected, actual }) => {
			assert_eq!(expected, 2);
			assert_eq!(actual, 1);
		}
		_ => panic!("expected an input shape mismatch"),
	}
}

#[test]
fn test_test_inference_missing_model() {
	let dir = tempfile::tempdir().unwrap();
	let config = Config {
		root: Some(dir.path().to_owned()),
		..Config::default()
	};
	let result = test_inference(&config);
	assert!(matches!(result, Err(Error::ArtifactNotFound(_))));
}
