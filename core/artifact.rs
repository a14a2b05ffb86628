use crate::error::Error;
use cardio_model::Model;
use std::path::Path;

/// What the deployed model can do, derived from the explicit capability
/// queries on the loaded artifact. Each capability is asked for
/// independently, so a family that lacks one still yields a complete
/// descriptor.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
	pub model_type: String,
	pub supports_predict: bool,
	pub supports_predict_proba: bool,
	pub is_pipeline: bool,
	pub pipeline_steps: Option<Vec<String>>,
}

pub fn load_model(path: &Path) -> Result<Model, Error> {
	if !path.exists() {
		return Err(Error::ArtifactNotFound(path.to_owned()));
	}
	Model::from_path(path).map_err(|error| Error::ArtifactDeserialize {
		path: path.to_owned(),
		message: error.to_string(),
	})
}

pub fn describe_model(model: &Model) -> ModelDescriptor {
	let pipeline_steps = model.pipeline_steps();
	ModelDescriptor {
		model_type: model.type_name().to_owned(),
		supports_predict: model.supports_predict(),
		supports_predict_proba: model.supports_predict_proba(),
		is_pipeline: pipeline_steps.is_some(),
		pipeline_steps,
	}
}

/// A two column classifier over Age and Sex, used by the tests in this
/// crate.
#[cfg(test)]
pub fn test_model() -> Model {
	use cardio_model::{features, BinaryClassifier, Column, EnumColumn, NumberColumn};
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
fn test_load_and_describe_model() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("model.cardio");
	test_model().to_file(&path).unwrap();
	let model = load_model(&path).unwrap();
	let descriptor = describe_model(&model);
	assert_eq!(descriptor.model_type, "LinearBinaryClassifier");
	assert!(descriptor.supports_predict);
	assert!(descriptor.supports_predict_proba);
	assert!(descriptor.is_pipeline);
	assert_eq!(
		descriptor.pipeline_steps.unwrap(),
		vec![
			"standard_scaler".to_owned(),
			"one_hot_encoder".to_owned(),
			"linear_classifier".to_owned(),
		]
	);
}

#[test]
fn test_load_model_missing() {
	let dir = tempfile::tempdir().unwrap();
	let result = load_model(&dir.path().join("model.cardio"));
	assert!(matches!(result, Err(Error::ArtifactNotFound(_))));
}

#[test]
fn test_load_model_corrupt() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("model.cardio");
	std::fs::write(&path, &[0, 255, 255, 255]).unwrap();
	let result = load_model(&path);
	assert!(matches!(result, Err(Error::ArtifactDeserialize { .. })));
}
