/*!
This crate defines the serialized model artifact. A model is written as a one
byte format version followed by the MessagePack encoding of the [`Model`]
enum. Capabilities vary by model family and are exposed as explicit queries
rather than probed dynamically, so a caller can ask about point prediction,
probability output, and pipeline structure independently.
*/

use anyhow::{format_err, Result};
use std::{
	io::{Read, Write},
	path::Path,
};

pub mod features;
pub mod predict;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum Model {
	Regressor(Regressor),
	BinaryClassifier(BinaryClassifier),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Regressor {
	pub target_column_name: String,
	pub columns: Vec<Column>,
	pub feature_groups: Vec<features::FeatureGroup>,
	pub bias: f32,
	pub weights: Vec<f32>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct BinaryClassifier {
	pub target_column_name: String,
	pub negative_class: String,
	pub positive_class: String,
	pub columns: Vec<Column>,
	pub feature_groups: Vec<features::FeatureGroup>,
	pub bias: f32,
	pub weights: Vec<f32>,
}

/// An input column the model was fit on.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum Column {
	Number(NumberColumn),
	Enum(EnumColumn),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct NumberColumn {
	pub name: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct EnumColumn {
	pub name: String,
	pub options: Vec<String>,
}

impl Column {
	pub fn name(&self) -> &str {
		match self {
			Column::Number(column) => &column.name,
			Column::Enum(column) => &column.name,
		}
	}
}

impl Model {
	/// Deserialize a `Model` from a slice.
	pub fn from_slice(slice: &[u8]) -> Result<Self> {
		let major_version = *slice
			.first()
			.ok_or_else(|| format_err!("the model data is empty"))?;
		if major_version != 0 {
			return Err(format_err!("unknown major version {}", major_version));
		}
		let model: Self = rmp_serde::from_slice(&slice[1..])?;
		Ok(model)
	}

	/// Deserialize a `Model` by reading the file at `path`.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = std::fs::File::open(path)?;
		let mut reader = std::io::BufReader::new(file);
		let mut major_version = [0u8; 1];
		reader.read_exact(&mut major_version)?;
		let major_version = major_version[0];
		if major_version != 0 {
			return Err(format_err!("unknown major version {}", major_version));
		}
		let model: Self = rmp_serde::from_read(&mut reader)?;
		Ok(model)
	}

	/// Write this model to the file at `path`.
	pub fn to_file(&self, path: &Path) -> Result<()> {
		let file = std::fs::File::create(path)?;
		let mut writer = std::io::BufWriter::new(file);
		writer.write_all(&[0])?;
		rmp_serde::encode::write_named(&mut writer, self)?;
		Ok(())
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Model::Regressor(_) => "LinearRegressor",
			Model::BinaryClassifier(_) => "LinearBinaryClassifier",
		}
	}

	/// Every model family produces a point prediction.
	pub fn supports_predict(&self) -> bool {
		true
	}

	/// Probability output exists for classifiers only.
	pub fn supports_predict_proba(&self) -> bool {
		match self {
			Model::Regressor(_) => false,
			Model::BinaryClassifier(_) => true,
		}
	}

	/// The named steps of the model when it is a multi-step pipeline: the
	/// feature transforms in order of first appearance, then the estimator.
	/// A model whose features are all identity passthroughs is a bare
	/// estimator, not a pipeline, and returns `None`.
	pub fn pipeline_steps(&self) -> Option<Vec<String>> {
		let mut steps: Vec<String> = Vec::new();
		for feature_group in self.feature_groups() {
			let step = match feature_group {
				features::FeatureGroup::Identity(_) => continue,
				features::FeatureGroup::Normalized(_) => "standard_scaler",
				features::FeatureGroup::OneHotEncoded(_) => "one_hot_encoder",
			};
			if !steps.iter().any(|existing| existing == step) {
				steps.push(step.to_owned());
			}
		}
		if steps.is_empty() {
			return None;
		}
		let estimator = match self {
			Model::Regressor(_) => "linear_regressor",
			Model::BinaryClassifier(_) => "linear_classifier",
		};
		steps.push(estimator.to_owned());
		Some(steps)
	}

	pub fn columns(&self) -> &[Column] {
		match self {
			Model::Regressor(model) => &model.columns,
			Model::BinaryClassifier(model) => &model.columns,
		}
	}

	pub fn feature_groups(&self) -> &[features::FeatureGroup] {
		match self {
			Model::Regressor(model) => &model.feature_groups,
			Model::BinaryClassifier(model) => &model.feature_groups,
		}
	}

	/// The number of values a prediction input must carry, one per input
	/// column.
	pub fn n_input_columns(&self) -> usize {
		self.columns().len()
	}
}

#[cfg(test)]
pub fn test_classifier() -> Model {
	Model::BinaryClassifier(BinaryClassifier {
		target_column_name: "HeartDisease".to_owned(),
		negative_class: "0".to_owned(),
		positive_class: "1".to_owned(),
		columns: vec![
			Column::Number(NumberColumn {
				name: "Age".to_owned(),
			}),
			Column::Enum(EnumColumn {
				name: "Sex".to_owned(),
				options: vec!["F".to_owned(), "M".to_owned()],
			}),
		],
		feature_groups: vec![
			features::FeatureGroup::Normalized(features::NormalizedFeatureGroup {
				source_column_name: "Age".to_owned(),
				mean: 50.0,
				variance: 100.0,
			}),
			features::FeatureGroup::OneHotEncoded(features::OneHotEncodedFeatureGroup {
				source_column_name: "Sex".to_owned(),
				categories: vec!["F".to_owned(), "M".to_owned()],
			}),
		],
		bias: -0.5,
		weights: vec![0.8, -0.3, 0.9],
	})
}

#[test]
fn test_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("model.cardio");
	let model = test_classifier();
	model.to_file(&path).unwrap();
	let loaded = Model::from_path(&path).unwrap();
	assert_eq!(loaded, model);
}

#[test]
fn test_unknown_major_version() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("model.cardio");
	std::fs::write(&path, &[9, 1, 2, 3]).unwrap();
	assert!(Model::from_path(&path).is_err());
	assert!(Model::from_slice(&[9, 1, 2, 3]).is_err());
	assert!(Model::from_slice(&[]).is_err());
}

#[test]
fn test_capabilities() {
	let classifier = test_classifier();
	assert!(classifier.supports_predict());
	assert!(classifier.supports_predict_proba());
	assert_eq!(classifier.type_name(), "LinearBinaryClassifier");
	assert_eq!(
		classifier.pipeline_steps().unwrap(),
		vec![
			"standard_scaler".to_owned(),
			"one_hot_encoder".to_owned(),
			"linear_classifier".to_owned(),
		]
	);
	let regressor = Model::Regressor(Regressor {
		target_column_name: "MaxHR".to_owned(),
		columns: vec![Column::Number(NumberColumn {
			name: "Age".to_owned(),
		})],
		feature_groups: vec![features::FeatureGroup::Identity(
			features::IdentityFeatureGroup {
				source_column_name: "Age".to_owned(),
			},
		)],
		bias: 0.0,
		weights: vec![1.0],
	});
	assert!(regressor.supports_predict());
	assert!(!regressor.supports_predict_proba());
	assert!(regressor.pipeline_steps().is_none());
}
