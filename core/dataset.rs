use crate::{config::Config, error::Error};
use cardio_dataframe::{Column, DataFrame, FromCsvOptions};
use std::collections::BTreeMap;

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct DatasetSummary {
	pub rows: usize,
	pub columns: usize,
	pub target_distribution: BTreeMap<String, u64>,
	pub numeric_features: Vec<String>,
	pub categorical_features: Vec<String>,
	pub memory_size: String,
}

pub fn load_dataframe(config: &Config) -> Result<DataFrame, Error> {
	let path = config.dataset_path();
	if !path.exists() {
		return Err(Error::ArtifactNotFound(path));
	}
	DataFrame::from_path(&path, FromCsvOptions::default()).map_err(|error| Error::ArtifactParse {
		path,
		message: error.to_string(),
	})
}

pub fn load_dataset(config: &Config) -> Result<DatasetSummary, Error> {
	let dataframe = load_dataframe(config)?;
	Ok(summarize(&dataframe, config.target_column_name()))
}

/// Summarize a loaded dataframe. The numeric and categorical feature lists
/// partition the non-target columns: number columns are numeric, enum and
/// text columns are categorical. A column with no valid values at all is
/// counted as numeric, the way an all-missing column loads in a dataframe
/// library.
pub fn summarize(dataframe: &DataFrame, target_column_name: &str) -> DatasetSummary {
	let mut numeric_features = Vec::new();
	let mut categorical_features = Vec::new();
	for column in dataframe.columns.iter() {
		if column.name() == target_column_name {
			continue;
		}
		match column {
			Column::Unknown(_) | Column::Number(_) => {
				numeric_features.push(column.name().to_owned())
			}
			Column::Enum(_) | Column::Text(_) => {
				categorical_features.push(column.name().to_owned())
			}
		}
	}
	let target_distribution = dataframe
		.column(target_column_name)
		.map(target_distribution)
		.unwrap_or_default();
	DatasetSummary {
		rows: dataframe.nrows(),
		columns: dataframe.ncols(),
		target_distribution,
		numeric_features,
		categorical_features,
		memory_size: cardio_util::size::kib(dataframe.byte_size()),
	}
}

/// The number of occurrences of each class of the target column, keyed by
/// the class label rendered as text.
fn target_distribution(column: &Column) -> BTreeMap<String, u64> {
	let mut distribution = BTreeMap::new();
	match column {
		Column::Unknown(_) => {}
		Column::Number(column) => {
			for value in column.data.iter() {
				if value.is_nan() {
					continue;
				}
				*distribution.entry(value.to_string()).or_insert(0) += 1;
			}
		}
		Column::Enum(column) => {
			for (option, count) in column.options.iter().zip(column.histogram().iter()) {
				distribution.insert(option.clone(), *count as u64);
			}
		}
		Column::Text(column) => {
			for value in column.data.iter() {
				*distribution.entry(value.clone()).or_insert(0) += 1;
			}
		}
	}
	distribution
}

#[cfg(test)]
fn write_spec_dataset(dir: &std::path::Path) {
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
}

#[test]
fn test_load_dataset() {
	let dir = tempfile::tempdir().unwrap();
	write_spec_dataset(dir.path());
	let config = Config {
		root: Some(dir.path().to_owned()),
		..Config::default()
	};
	let summary = load_dataset(&config).unwrap();
	assert_eq!(summary.rows, 10);
	assert_eq!(summary.columns, 3);
	let mut expected = BTreeMap::new();
	expected.insert("0".to_owned(), 6);
	expected.insert("1".to_owned(), 4);
	assert_eq!(summary.target_distribution, expected);
	assert_eq!(summary.numeric_features, vec!["Age".to_owned()]);
	assert_eq!(summary.categorical_features, vec!["Sex".to_owned()]);
}

#[test]
fn test_load_dataset_missing_file() {
	let dir = tempfile::tempdir().unwrap();
	let config = Config {
		root: Some(dir.path().to_owned()),
		..Config::default()
	};
	let result = load_dataset(&config);
	assert!(matches!(result, Err(Error::ArtifactNotFound(_))));
}

#[test]
fn test_feature_lists_partition_non_target_columns() {
	let csv = "Age,Sex,ChestPainType,RestingBP,Cholesterol,FastingBS,HeartDisease\n\
		40,M,ATA,140,289,0,0\n\
		49,F,NAP,160,180,0,1\n\
		37,M,ATA,130,283,1,0\n";
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("heart.csv");
	std::fs::write(&path, csv).unwrap();
	let dataframe = DataFrame::from_path(&path, FromCsvOptions::default()).unwrap();
	let summary = summarize(&dataframe, "HeartDisease");
	for name in summary.numeric_features.iter() {
		assert!(!summary.categorical_features.contains(name));
	}
	let total = summary.numeric_features.len() + summary.categorical_features.len();
	assert_eq!(total, dataframe.ncols() - 1);
	assert!(!summary.numeric_features.contains(&"HeartDisease".to_owned()));
	assert!(!summary.categorical_features.contains(&"HeartDisease".to_owned()));
	assert_eq!(
		summary.numeric_features,
		vec![
			"Age".to_owned(),
			"RestingBP".to_owned(),
			"Cholesterol".to_owned(),
			"FastingBS".to_owned(),
		]
	);
	assert_eq!(
		summary.categorical_features,
		vec!["Sex".to_owned(), "ChestPainType".to_owned()]
	);
}
