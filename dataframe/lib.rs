/*!
This crate provides a minimal column-typed table, just enough to load,
summarize, and sample the project dataset. Each column carries its own value
type, inferred from the csv contents when it is not specified up front.
*/

use std::num::NonZeroUsize;

pub mod load;

pub use self::load::*;

#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
	pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
	Unknown(UnknownColumn),
	Number(NumberColumn),
	Enum(EnumColumn),
	Text(TextColumn),
}

/// A column whose type could not be determined because it contained no valid
/// values. Only the row count is retained.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownColumn {
	pub name: String,
	pub len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumn {
	pub name: String,
	pub data: Vec<f32>,
}

/// Values are stored as 1-based indexes into `options`. `None` marks a value
/// that was invalid or not among the options.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumColumn {
	pub name: String,
	pub options: Vec<String>,
	pub data: Vec<Option<NonZeroUsize>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextColumn {
	pub name: String,
	pub data: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum ColumnType {
	Unknown,
	Number,
	Enum { options: Vec<String> },
	Text,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
	Unknown,
	Number(f32),
	Enum(Option<&'a str>),
	Text(&'a str),
}

impl DataFrame {
	pub fn new(column_names: Vec<String>, column_types: Vec<ColumnType>) -> Self {
		let columns = column_names
			.into_iter()
			.zip(column_types.into_iter())
			.map(|(name, column_type)| match column_type {
				ColumnType::Unknown => Column::Unknown(UnknownColumn { name, len: 0 }),
				ColumnType::Number => Column::Number(NumberColumn { name, data: Vec::new() }),
				ColumnType::Enum { options } => Column::Enum(EnumColumn {
					name,
					options,
					data: Vec::new(),
				}),
				ColumnType::Text => Column::Text(TextColumn { name, data: Vec::new() }),
			})
			.collect();
		Self { columns }
	}

	pub fn ncols(&self) -> usize {
		self.columns.len()
	}

	pub fn nrows(&self) -> usize {
		self.columns.first().map(|column| column.len()).unwrap_or(0)
	}

	pub fn column(&self, name: &str) -> Option<&Column> {
		self.columns.iter().find(|column| column.name() == name)
	}

	/// An estimate of the heap storage held by the values of all columns.
	pub fn byte_size(&self) -> u64 {
		self.columns.iter().map(|column| column.byte_size()).sum()
	}
}

impl Column {
	pub fn name(&self) -> &str {
		match self {
			Column::Unknown(column) => &column.name,
			Column::Number(column) => &column.name,
			Column::Enum(column) => &column.name,
			Column::Text(column) => &column.name,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Column::Unknown(column) => column.len,
			Column::Number(column) => column.data.len(),
			Column::Enum(column) => column.data.len(),
			Column::Text(column) => column.data.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn as_number(&self) -> Option<&NumberColumn> {
		match self {
			Column::Number(column) => Some(column),
			_ => None,
		}
	}

	pub fn as_enum(&self) -> Option<&EnumColumn> {
		match self {
			Column::Enum(column) => Some(column),
			_ => None,
		}
	}

	pub fn as_text(&self) -> Option<&TextColumn> {
		match self {
			Column::Text(column) => Some(column),
			_ => None,
		}
	}

	pub fn value(&self, index: usize) -> Value {
		match self {
			Column::Unknown(_) => Value::Unknown,
			Column::Number(column) => Value::Number(column.data[index]),
			Column::Enum(column) => Value::Enum(
				column.data[index].map(|position| column.options[position.get() - 1].as_str()),
			),
			Column::Text(column) => Value::Text(&column.data[index]),
		}
	}

	pub fn byte_size(&self) -> u64 {
		match self {
			Column::Unknown(_) => 0,
			Column::Number(column) => {
				(column.data.len() * std::mem::size_of::<f32>()) as u64
			}
			Column::Enum(column) => {
				let data = column.data.len() * std::mem::size_of::<Option<NonZeroUsize>>();
				let options: usize = column.options.iter().map(|option| option.len()).sum();
				(data + options) as u64
			}
			Column::Text(column) => column.data.iter().map(|value| value.len() as u64).sum(),
		}
	}
}

impl EnumColumn {
	/// The number of occurrences of each option, in option order.
	pub fn histogram(&self) -> Vec<usize> {
		let mut histogram = vec![0; self.options.len()];
		for value in self.data.iter().flatten() {
			histogram[value.get() - 1] += 1;
		}
		histogram
	}
}

#[test]
fn test_byte_size() {
	let df = DataFrame {
		columns: vec![
			Column::Number(NumberColumn {
				name: "a".to_owned(),
				data: vec![1.0, 2.0],
			}),
			Column::Text(TextColumn {
				name: "b".to_owned(),
				data: vec!["xy".to_owned(), "z".to_owned()],
			}),
		],
	};
	assert_eq!(df.byte_size(), 8 + 3);
}

#[test]
fn test_enum_histogram() {
	let column = EnumColumn {
		name: "c".to_owned(),
		options: vec!["x".to_owned(), "y".to_owned()],
		data: vec![
			NonZeroUsize::new(1),
			NonZeroUsize::new(2),
			NonZeroUsize::new(1),
			None,
		],
	};
	assert_eq!(column.histogram(), vec![2, 1]);
}
