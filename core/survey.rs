use crate::config::Config;
use std::{collections::BTreeMap, path::Path};

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct DirectoryEntry {
	pub name: String,
	pub size: String,
	pub kind: EntryKind,
}

#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq)]
pub enum EntryKind {
	#[serde(rename = "file")]
	File,
	#[serde(rename = "folder")]
	Folder,
	#[serde(rename = "missing")]
	Missing,
}

/// Folder entries have their name suffixed with this marker and carry the
/// size placeholder instead of a byte count.
const FOLDER_MARKER: char = '/';
const SIZE_PLACEHOLDER: &str = "-";

/// List the immediate children of `path`, excluding hidden entries. A
/// missing directory yields a single sentinel entry of kind `Missing`, which
/// keeps it distinguishable from an existing empty directory (an empty
/// vector). Entries come back in the underlying directory order.
pub fn list_directory(path: &Path) -> Vec<DirectoryEntry> {
	let entries = match std::fs::read_dir(path) {
		Ok(entries) => entries,
		Err(error) => {
			tracing::warn!("failed to read directory {}: {}", path.display(), error);
			return vec![DirectoryEntry {
				name: "not found".to_owned(),
				size: SIZE_PLACEHOLDER.to_owned(),
				kind: EntryKind::Missing,
			}];
		}
	};
	let mut listing = Vec::new();
	for entry in entries {
		let entry = match entry {
			Ok(entry) => entry,
			Err(error) => {
				tracing::warn!("failed to read an entry of {}: {}", path.display(), error);
				continue;
			}
		};
		let name = entry.file_name().to_string_lossy().into_owned();
		if name.starts_with('.') {
			continue;
		}
		let metadata = match entry.metadata() {
			Ok(metadata) => metadata,
			Err(error) => {
				tracing::warn!("failed to stat {}: {}", entry.path().display(), error);
				continue;
			}
		};
		if metadata.is_dir() {
			listing.push(DirectoryEntry {
				name: format!("{}{}", name, FOLDER_MARKER),
				size: SIZE_PLACEHOLDER.to_owned(),
				kind: EntryKind::Folder,
			});
		} else {
			listing.push(DirectoryEntry {
				name,
				size: cardio_util::size::kib(metadata.len()),
				kind: EntryKind::File,
			});
		}
	}
	listing
}

/// One listing per configured project subdirectory.
pub fn survey(config: &Config) -> BTreeMap<String, Vec<DirectoryEntry>> {
	config
		.survey_directories()
		.into_iter()
		.map(|name| {
			let listing = list_directory(&config.survey_directory_path(&name));
			(name, listing)
		})
		.collect()
}

#[test]
fn test_list_directory_missing() {
	let dir = tempfile::tempdir().unwrap();
	let listing = list_directory(&dir.path().join("missing"));
	assert_eq!(
		listing,
		vec![DirectoryEntry {
			name: "not found".to_owned(),
			size: "-".to_owned(),
			kind: EntryKind::Missing,
		}]
	);
}

#[test]
fn test_list_directory_empty() {
	let dir = tempfile::tempdir().unwrap();
	assert_eq!(list_directory(dir.path()), Vec::new());
}

#[test]
fn test_list_directory_entries() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(dir.path().join("data.csv"), vec![0u8; 1536]).unwrap();
	std::fs::create_dir(dir.path().join("sub")).unwrap();
	std::fs::write(dir.path().join(".hidden"), "x").unwrap();
	let mut listing = list_directory(dir.path());
	listing.sort_by(|a, b| a.name.cmp(&b.name));
	assert_eq!(
		listing,
		vec![
			DirectoryEntry {
				name: "data.csv".to_owned(),
				size: "1.5 KB".to_owned(),
				kind: EntryKind::File,
			},
			DirectoryEntry {
				name: "sub/".to_owned(),
				size: "-".to_owned(),
				kind: EntryKind::Folder,
			},
		]
	);
}

#[test]
fn test_survey_covers_configured_directories() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::create_dir(dir.path().join("notebooks")).unwrap();
	let config = Config {
		root: Some(dir.path().to_owned()),
		..Config::default()
	};
	let listings = survey(&config);
	assert_eq!(listings.len(), 6);
	assert_eq!(listings["notebooks"], Vec::new());
	assert_eq!(listings["docker"][0].kind, EntryKind::Missing);
}
