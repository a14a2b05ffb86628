use crate::{Column, ColumnType, DataFrame};
use anyhow::Result;
use std::{
	collections::{BTreeMap, BTreeSet},
	num::NonZeroUsize,
	path::Path,
};

#[derive(Clone, Debug)]
pub struct FromCsvOptions {
	pub infer_options: InferOptions,
	pub invalid_values: &'static [&'static str],
}

impl Default for FromCsvOptions {
	fn default() -> Self {
		Self {
			infer_options: InferOptions::default(),
			invalid_values: DEFAULT_INVALID_VALUES,
		}
	}
}

#[derive(Clone, Debug)]
pub struct InferOptions {
	/// A column whose unique value count exceeds this bound is inferred as
	/// text rather than enum.
	pub enum_max_unique_values: usize,
}

impl Default for InferOptions {
	fn default() -> Self {
		Self {
			enum_max_unique_values: 100,
		}
	}
}

/// These values are treated as missing wherever they appear.
const DEFAULT_INVALID_VALUES: &[&str] = &[
	"", "null", "NULL", "n/a", "N/A", "nan", "-nan", "NaN", "-NaN", "?",
];

impl DataFrame {
	pub fn from_path(path: &Path, options: FromCsvOptions) -> Result<Self> {
		Self::from_csv(&mut csv::Reader::from_path(path)?, options)
	}

	pub fn from_csv<R>(reader: &mut csv::Reader<R>, options: FromCsvOptions) -> Result<Self>
	where
		R: std::io::Read + std::io::Seek,
	{
		let column_names: Vec<String> = reader
			.headers()?
			.into_iter()
			.map(|column_name| column_name.to_owned())
			.collect();
		let start_position = reader.position().clone();
		// First pass: infer each column's type from its values. The result
		// depends only on the set of values seen, not on row order.
		let mut infer_stats: Vec<InferStats> = column_names
			.iter()
			.map(|_| InferStats::new(&options))
			.collect();
		let mut record = csv::StringRecord::new();
		let mut n_rows = 0;
		while reader.read_record(&mut record)? {
			n_rows += 1;
			for (infer_stats, value) in infer_stats.iter_mut().zip(record.iter()) {
				infer_stats.update(value);
			}
		}
		let column_types: Vec<ColumnType> = infer_stats
			.into_iter()
			.map(|infer_stats| infer_stats.finalize())
			.collect();
		// Second pass: return to the beginning of the csv and load the values.
		reader.seek(start_position)?;
		let mut dataframe = DataFrame::new(column_names, column_types);
		for column in dataframe.columns.iter_mut() {
			match column {
				Column::Unknown(_) => {}
				Column::Number(column) => column.data.reserve_exact(n_rows),
				Column::Enum(column) => column.data.reserve_exact(n_rows),
				Column::Text(column) => column.data.reserve_exact(n_rows),
			}
		}
		let option_positions: Vec<Option<BTreeMap<String, usize>>> = dataframe
			.columns
			.iter()
			.map(|column| match column {
				Column::Enum(column) => Some(
					column
						.options
						.iter()
						.enumerate()
						.map(|(position, option)| (option.clone(), position))
						.collect(),
				),
				_ => None,
			})
			.collect();
		let mut record = csv::StringRecord::new();
		while reader.read_record(&mut record)? {
			for ((column, positions), value) in dataframe
				.columns
				.iter_mut()
				.zip(option_positions.iter())
				.zip(record.iter())
			{
				match column {
					Column::Unknown(column) => {
						column.len += 1;
					}
					Column::Number(column) => {
						let value = match lexical::parse::<f32, &str>(value) {
							Ok(value) if value.is_finite() => value,
							_ => std::f32::NAN,
						};
						column.data.push(value);
					}
					Column::Enum(column) => {
						let value = positions
							.as_ref()
							.unwrap()
							.get(value)
							.map(|position| NonZeroUsize::new(position + 1).unwrap());
						column.data.push(value);
					}
					Column::Text(column) => {
						column.data.push(value.to_owned());
					}
				}
			}
		}
		Ok(dataframe)
	}
}

#[derive(Clone, Debug)]
struct InferStats<'a> {
	options: &'a FromCsvOptions,
	column_type: InferColumnType,
	unique_values: Option<BTreeSet<String>>,
}

#[derive(PartialEq, Clone, Copy, Debug)]
enum InferColumnType {
	Unknown,
	Number,
	Enum,
	Text,
}

impl<'a> InferStats<'a> {
	fn new(options: &'a FromCsvOptions) -> Self {
		Self {
			options,
			column_type: InferColumnType::Unknown,
			unique_values: Some(BTreeSet::new()),
		}
	}

	fn update(&mut self, value: &str) {
		if self.options.invalid_values.contains(&value) {
			return;
		}
		if let Some(unique_values) = self.unique_values.as_mut() {
			if !unique_values.contains(value) {
				unique_values.insert(value.to_owned());
			}
			if unique_values.len() > self.options.infer_options.enum_max_unique_values {
				self.unique_values = None;
			}
		}
		match self.column_type {
			InferColumnType::Unknown | InferColumnType::Number => {
				if lexical::parse::<f32, &str>(value)
					.map(|value| value.is_finite())
					.unwrap_or(false)
				{
					self.column_type = InferColumnType::Number;
				} else if self.unique_values.is_some() {
					self.column_type = InferColumnType::Enum;
				} else {
					self.column_type = InferColumnType::Text;
				}
			}
			InferColumnType::Enum => {
				if self.unique_values.is_none() {
					self.column_type = InferColumnType::Text;
				}
			}
			_ => {}
		}
	}

	fn finalize(self) -> ColumnType {
		match self.column_type {
			InferColumnType::Unknown => ColumnType::Unknown,
			InferColumnType::Number => ColumnType::Number,
			InferColumnType::Enum => ColumnType::Enum {
				options: self.unique_values.unwrap().into_iter().collect(),
			},
			InferColumnType::Text => ColumnType::Text,
		}
	}
}

#[test]
fn test_infer() {
	let csv = "number,enum,text\n1,test,hello\n2,test,world\n";
	let df = DataFrame::from_csv(
		&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
		FromCsvOptions {
			infer_options: InferOptions {
				enum_max_unique_values: 1,
			},
			..Default::default()
		},
	)
	.unwrap();
	assert_eq!(df.nrows(), 2);
	assert_eq!(df.ncols(), 3);
	let number = df.columns[0].as_number().unwrap();
	assert_eq!(number.data, vec![1.0, 2.0]);
	let enum_column = df.columns[1].as_enum().unwrap();
	assert_eq!(enum_column.options, vec!["test".to_owned()]);
	assert_eq!(
		enum_column.data,
		vec![NonZeroUsize::new(1), NonZeroUsize::new(1)]
	);
	let text = df.columns[2].as_text().unwrap();
	assert_eq!(text.data, vec!["hello".to_owned(), "world".to_owned()]);
}

#[test]
fn test_invalid_values() {
	let csv = "a,b\n?,x\nn/a,y\n3.5,z\n";
	let df = DataFrame::from_csv(
		&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
		FromCsvOptions::default(),
	)
	.unwrap();
	let a = df.columns[0].as_number().unwrap();
	assert!(a.data[0].is_nan());
	assert!(a.data[1].is_nan());
	assert_eq!(a.data[2], 3.5);
	let b = df.columns[1].as_enum().unwrap();
	assert_eq!(
		b.options,
		vec!["x".to_owned(), "y".to_owned(), "z".to_owned()]
	);
}

#[test]
fn test_integer_valued_column_is_number() {
	// A column holding only 0 and 1 still classifies by value type.
	let csv = "flag,label\n0,yes\n1,no\n0,yes\n";
	let df = DataFrame::from_csv(
		&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
		FromCsvOptions::default(),
	)
	.unwrap();
	assert!(df.columns[0].as_number().is_some());
	assert!(df.columns[1].as_enum().is_some());
}

#[test]
fn test_infer_is_row_order_independent() {
	let forward = "x\n1\ntwo\n3\n";
	let backward = "x\n3\ntwo\n1\n";
	let load = |csv: &str| {
		DataFrame::from_csv(
			&mut csv::Reader::from_reader(std::io::Cursor::new(csv.to_owned())),
			FromCsvOptions::default(),
		)
		.unwrap()
	};
	let forward = load(forward);
	let backward = load(backward);
	assert_eq!(
		forward.columns[0].as_enum().unwrap().options,
		backward.columns[0].as_enum().unwrap().options,
	);
}
