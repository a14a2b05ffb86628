use crate::{features, Model};
use ndarray::prelude::*;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PredictError {
	#[error("input has {actual} values but the model expects {expected}")]
	ShapeMismatch { expected: usize, actual: usize },
	#[error("feature group references unknown column {0}")]
	UnknownColumn(String),
	#[error("the model has {weights} weights but produced {features} features")]
	WeightMismatch { weights: usize, features: usize },
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PredictOutput {
	Regression(RegressionPredictOutput),
	BinaryClassification(BinaryClassificationPredictOutput),
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct RegressionPredictOutput {
	pub value: f32,
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct BinaryClassificationPredictOutput {
	pub class_name: String,
	pub probability: f32,
}

/// Predict a single example. `input` carries one raw value per input column;
/// see [`features::compute_features`] for the encoding.
pub fn predict(model: &Model, input: &[f32]) -> Result<PredictOutput, PredictError> {
	let expected = model.n_input_columns();
	if input.len() != expected {
		return Err(PredictError::ShapeMismatch {
			expected,
			actual: input.len(),
		});
	}
	let features = features::compute_features(model.columns(), model.feature_groups(), input)?;
	match model {
		Model::Regressor(model) => {
			let value = model.bias + dot(&model.weights, &features)?;
			Ok(PredictOutput::Regression(RegressionPredictOutput { value }))
		}
		Model::BinaryClassifier(model) => {
			let logit = model.bias + dot(&model.weights, &features)?;
			let probability = 1.0 / ((-logit).exp() + 1.0);
			let class_name = if probability >= 0.5 {
				model.positive_class.clone()
			} else {
				model.negative_class.clone()
			};
			Ok(PredictOutput::BinaryClassification(
				BinaryClassificationPredictOutput {
					class_name,
					probability,
				},
			))
		}
	}
}

fn dot(weights: &[f32], features: &Array1<f32>) -> Result<f32, PredictError> {
	if weights.len() != features.len() {
		return Err(PredictError::WeightMismatch {
			weights: weights.len(),
			features: features.len(),
		});
	}
	Ok(ArrayView1::from(weights).dot(features))
}

#[test]
fn test_predict_shape_mismatch() {
	let model = crate::test_classifier();
	let result = predict(&model, &[45.0]);
	assert_eq!(
		result.unwrap_err(),
		PredictError::ShapeMismatch {
			expected: 2,
			actual: 1,
		}
	);
}

#[test]
fn test_predict_binary_classifier() {
	let model = crate::test_classifier();
	// Age 60 -> normalized 1.0, Sex index 1 -> one hot (0, 1).
	// logit = -0.5 + 0.8 * 1.0 + 0.9 = 1.2
	let output = predict(&model, &[60.0, 1.0]).unwrap();
	match output {
		PredictOutput::BinaryClassification(output) => {
			assert_eq!(output.class_name, "1");
			let expected = 1.0 / ((-1.2f32).exp() + 1.0);
			assert!((output.probability - expected).abs() < 1e-6);
		}
		_ => panic!("expected a binary classification output"),
	}
}

#[test]
fn test_predict_regressor() {
	let model = Model::Regressor(crate::Regressor {
		target_column_name: "MaxHR".to_owned(),
		columns: vec![crate::Column::Number(crate::NumberColumn {
			name: "Age".to_owned(),
		})],
		feature_groups: vec![features::FeatureGroup::Identity(
			features::IdentityFeatureGroup {
				source_column_name: "Age".to_owned(),
			},
		)],
		bias: 1.0,
		weights: vec![2.0],
	});
	let output = predict(&model, &[3.0]).unwrap();
	assert_eq!(
		output,
		PredictOutput::Regression(RegressionPredictOutput { value: 7.0 })
	);
}

#[test]
fn test_predict_weight_mismatch() {
	let mut model = crate::test_classifier();
	if let Model::BinaryClassifier(classifier) = &mut model {
		classifier.weights.truncate(1);
	}
	let result = predict(&model, &[60.0, 1.0]);
	assert_eq!(
		result.unwrap_err(),
		PredictError::WeightMismatch {
			weights: 1,
			features: 3,
		}
	);
}
