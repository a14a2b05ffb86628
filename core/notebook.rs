/*!
The notebook inspector produces a bounded preview of each analysis notebook.
It never fails: any read or parse error is folded into the summary itself as
a single `[ERROR]` preview, so one broken notebook cannot take down a whole
snapshot.
*/

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SummarizeOptions {
	/// Only this many cells are examined, in document order.
	pub max_cells: usize,
	/// Previews carry this many characters of the cell source.
	pub preview_len: usize,
	/// Only this many previews are exposed on the summary.
	pub preview_count: usize,
}

impl Default for SummarizeOptions {
	fn default() -> Self {
		Self {
			max_cells: 10,
			preview_len: 200,
			preview_count: 3,
		}
	}
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct NotebookSummary {
	pub file: String,
	pub previews: Vec<String>,
	/// The total number of previews generated, which can exceed
	/// `previews.len()` when the notebook has more previewable cells than
	/// `preview_count`.
	pub cell_count: usize,
	pub size: String,
}

/// The subset of the notebook document format the inspector reads. A cell's
/// `source` is either a single string or a list of line strings on disk.
#[derive(serde::Deserialize)]
struct Notebook {
	#[serde(default)]
	cells: Vec<Cell>,
}

#[derive(serde::Deserialize)]
struct Cell {
	cell_type: String,
	#[serde(default)]
	source: CellSource,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum CellSource {
	Text(String),
	Lines(Vec<String>),
}

impl Default for CellSource {
	fn default() -> Self {
		CellSource::Text(String::new())
	}
}

impl CellSource {
	fn text(&self) -> String {
		match self {
			CellSource::Text(text) => text.clone(),
			CellSource::Lines(lines) => lines.concat(),
		}
	}
}

pub fn summarize_all(config: &Config) -> Vec<NotebookSummary> {
	config
		.notebook_paths()
		.iter()
		.map(|path| summarize(path, &SummarizeOptions::default()))
		.collect()
}

pub fn summarize(path: &Path, options: &SummarizeOptions) -> NotebookSummary {
	let file = path
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.display().to_string());
	match summarize_inner(path, options) {
		Ok((previews, size)) => NotebookSummary {
			file,
			cell_count: previews.len(),
			previews: previews
				.into_iter()
				.take(options.preview_count)
				.collect(),
			size: cardio_util::size::kib(size),
		},
		Err(error) => {
			tracing::warn!("failed to summarize notebook {}: {:#}", path.display(), error);
			NotebookSummary {
				file,
				previews: vec![format!("[ERROR] {:#}", error)],
				cell_count: 1,
				size: cardio_util::size::kib(0),
			}
		}
	}
}

fn summarize_inner(path: &Path, options: &SummarizeOptions) -> Result<(Vec<String>, u64)> {
	let size = std::fs::metadata(path)
		.with_context(|| format!("failed to read notebook {}", path.display()))?
		.len();
	let contents = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read notebook {}", path.display()))?;
	let notebook: Notebook = serde_json::from_str(&contents)
		.with_context(|| format!("failed to parse notebook {}", path.display()))?;
	let mut previews = Vec::new();
	for cell in notebook.cells.iter().take(options.max_cells) {
		let tag = match cell.cell_type.as_str() {
			"code" => "[CODE]",
			"markdown" => "[MARKDOWN]",
			_ => continue,
		};
		let text = cell.source.text();
		let preview: String = text.chars().take(options.preview_len).collect();
		previews.push(format!("{} {}...", tag, preview));
	}
	Ok((previews, size))
}

#[cfg(test)]
fn write_notebook(path: &Path, cells: &[(&str, serde_json::Value)]) {
	let cells: Vec<serde_json::Value> = cells
		.iter()
		.map(|(cell_type, source)| {
			serde_json::json!({ "cell_type": cell_type, "source": source })
		})
		.collect();
	let notebook = serde_json::json!({ "cells": cells, "nbformat": 4 });
	std::fs::write(path, serde_json::to_string(&notebook).unwrap()).unwrap();
}

#[test]
fn test_summarize_missing_file() {
	let dir = tempfile::tempdir().unwrap();
	let summary = summarize(
		&dir.path().join("missing.ipynb"),
		&SummarizeOptions::default(),
	);
	assert_eq!(summary.file, "missing.ipynb");
	assert_eq!(summary.cell_count, 1);
	assert_eq!(summary.previews.len(), 1);
	assert!(summary.previews[0].starts_with("[ERROR]"));
}

#[test]
fn test_summarize_cell_kinds_and_truncation() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("demo.ipynb");
	write_notebook(
		&path,
		&[
			("code", serde_json::json!("import pandas as pd")),
			(
				"markdown",
				serde_json::json!(["# Heart disease\n", "A study."]),
			),
			("raw", serde_json::json!("ignored")),
			("code", serde_json::json!("x".repeat(300))),
		],
	);
	let summary = summarize(&path, &SummarizeOptions::default());
	assert_eq!(summary.cell_count, 3);
	assert_eq!(summary.previews.len(), 3);
	assert_eq!(summary.previews[0], "[CODE] import pandas as pd...");
	assert_eq!(summary.previews[1], "[MARKDOWN] # Heart disease\nA study....");
	assert!(summary.previews[2].ends_with("..."));
	// "[CODE] " plus 200 characters of source plus the marker.
	assert_eq!(summary.previews[2].chars().count(), 7 + 200 + 3);
}

#[test]
fn test_summarize_bounds() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("long.ipynb");
	let cells: Vec<(&str, serde_json::Value)> = (0..15)
		.map(|_| ("code", serde_json::json!("print(1)")))
		.collect();
	write_notebook(&path, &cells);
	let summary = summarize(&path, &SummarizeOptions::default());
	assert_eq!(summary.cell_count, 10);
	assert_eq!(summary.previews.len(), 3);
}

#[test]
fn test_summarize_is_idempotent() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("demo.ipynb");
	write_notebook(&path, &[("code", serde_json::json!("print(1)"))]);
	let first = summarize(&path, &SummarizeOptions::default());
	let second = summarize(&path, &SummarizeOptions::default());
	assert_eq!(first, second);
}

#[test]
fn test_summarize_invalid_json() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("broken.ipynb");
	std::fs::write(&path, "not json").unwrap();
	let summary = summarize(&path, &SummarizeOptions::default());
	assert_eq!(summary.cell_count, 1);
	assert!(summary.previews[0].starts_with("[ERROR]"));
}
