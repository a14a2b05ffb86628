use crate::{predict::PredictError, Column};
use ndarray::prelude::*;

/// Feature groups map raw input values into the feature space the estimator
/// was fit on. Each group consumes one source column and produces one or
/// more features.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum FeatureGroup {
	Identity(IdentityFeatureGroup),
	Normalized(NormalizedFeatureGroup),
	OneHotEncoded(OneHotEncodedFeatureGroup),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct IdentityFeatureGroup {
	pub source_column_name: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct NormalizedFeatureGroup {
	pub source_column_name: String,
	pub mean: f32,
	pub variance: f32,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct OneHotEncodedFeatureGroup {
	pub source_column_name: String,
	pub categories: Vec<String>,
}

impl FeatureGroup {
	pub fn source_column_name(&self) -> &str {
		match self {
			FeatureGroup::Identity(group) => &group.source_column_name,
			FeatureGroup::Normalized(group) => &group.source_column_name,
			FeatureGroup::OneHotEncoded(group) => &group.source_column_name,
		}
	}

	pub fn n_features(&self) -> usize {
		match self {
			FeatureGroup::Identity(_) => 1,
			FeatureGroup::Normalized(_) => 1,
			FeatureGroup::OneHotEncoded(group) => group.categories.len(),
		}
	}
}

/// Compute the feature vector for a single input row. `input` carries one raw
/// value per input column, in column order; enum values are given by their
/// zero-based option index. An enum value outside the category range encodes
/// to all zeros rather than failing, mirroring how unseen categories are
/// handled at training time.
pub fn compute_features(
	columns: &[Column],
	feature_groups: &[FeatureGroup],
	input: &[f32],
) -> Result<Array1<f32>, PredictError> {
	let n_features: usize = feature_groups
		.iter()
		.map(|feature_group| feature_group.n_features())
		.sum();
	let mut features = Array::zeros(n_features);
	let mut offset = 0;
	for feature_group in feature_groups {
		let source_column_name = feature_group.source_column_name();
		let column_index = columns
			.iter()
			.position(|column| column.name() == source_column_name)
			.ok_or_else(|| PredictError::UnknownColumn(source_column_name.to_owned()))?;
		let value = input[column_index];
		match feature_group {
			FeatureGroup::Identity(_) => {
				features[offset] = value;
			}
			FeatureGroup::Normalized(group) => {
				features[offset] = if group.variance == 0.0 {
					0.0
				} else {
					(value - group.mean) / group.variance.sqrt()
				};
			}
			FeatureGroup::OneHotEncoded(group) => {
				let index = value as usize;
				if value >= 0.0 && value.fract() == 0.0 && index < group.categories.len() {
					features[offset + index] = 1.0;
				}
			}
		}
		offset += feature_group.n_features();
	}
	Ok(features)
}

#[test]
fn test_compute_features() {
	let model = crate::test_classifier();
	let features =
		compute_features(model.columns(), model.feature_groups(), &[60.0, 1.0]).unwrap();
	assert_eq!(features.len(), 3);
	assert!((features[0] - 1.0).abs() < f32::EPSILON);
	assert_eq!(features[1], 0.0);
	assert_eq!(features[2], 1.0);
}

#[test]
fn test_compute_features_out_of_range_enum() {
	let model = crate::test_classifier();
	let features =
		compute_features(model.columns(), model.feature_groups(), &[50.0, 7.0]).unwrap();
	assert_eq!(features[1], 0.0);
	assert_eq!(features[2], 0.0);
}

#[test]
fn test_compute_features_unknown_column() {
	let columns = vec![Column::Number(crate::NumberColumn {
		name: "Age".to_owned(),
	})];
	let feature_groups = vec![FeatureGroup::Identity(IdentityFeatureGroup {
		source_column_name: "Missing".to_owned(),
	})];
	let result = compute_features(&columns, &feature_groups, &[1.0]);
	assert_eq!(
		result.unwrap_err(),
		PredictError::UnknownColumn("Missing".to_owned())
	);
}
