//! File-backed persistence for extension enum id claims.
//!
//! Each extensible enumeration gets one store file named after its logical
//! type name, holding newline-delimited JSON records of `(name, index)`
//! claims. Loading is lenient: a malformed line costs that entry and a
//! warning, never the host process. Saving is atomic: entries are written to
//! a sibling temp file which is then renamed over the target, so a crash
//! mid-write cannot corrupt previously-good data.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One persisted claim: an extension-registered name and the raw id it was
/// issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
	pub name: String,
	pub index: i32,
}

impl CacheEntry {
	pub fn new(name: impl Into<String>, index: i32) -> Self {
		Self {
			name: name.into(),
			index,
		}
	}
}

/// Errors from the write side of the store.
///
/// The read side never errors; see [`CacheStore::load`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("failed to create store directory {path}: {source}")]
	CreateDir {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to encode entry `{name}`: {source}")]
	Encode {
		name: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("failed to write {path}: {source}")]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to replace {path}: {source}")]
	Replace {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

/// File-backed store, one `<store_name>.jsonl` file per enumeration under a
/// root directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
	root: PathBuf,
}

impl CacheStore {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Path of the store file for a logical enumeration name.
	pub fn path_for(&self, store_name: &str) -> PathBuf {
		self.root.join(format!("{store_name}.jsonl"))
	}

	/// Loads all well-formed entries for `store_name`.
	///
	/// A missing file yields an empty list. Malformed lines are skipped with
	/// a warning, as are entries that repeat an earlier name or index (the
	/// first occurrence wins, keeping the loaded set bijective). Loading
	/// never fails and never panics.
	pub fn load(&self, store_name: &str) -> Vec<CacheEntry> {
		let path = self.path_for(store_name);
		let text = match fs::read_to_string(&path) {
			Ok(text) => text,
			Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
			Err(err) => {
				tracing::warn!(
					path = %path.display(),
					error = %err,
					"cache store unreadable; treating as empty"
				);
				return Vec::new();
			}
		};

		let mut entries: Vec<CacheEntry> = Vec::new();
		for (lineno, line) in text.lines().enumerate() {
			let line = line.trim();
			if line.is_empty() {
				continue;
			}
			let entry: CacheEntry = match serde_json::from_str(line) {
				Ok(entry) => entry,
				Err(err) => {
					tracing::warn!(
						store = store_name,
						line = lineno + 1,
						error = %err,
						"skipping malformed cache entry"
					);
					continue;
				}
			};
			if entries.iter().any(|e| e.name == entry.name) {
				tracing::warn!(
					store = store_name,
					line = lineno + 1,
					name = %entry.name,
					"skipping cache entry with duplicate name"
				);
				continue;
			}
			if entries.iter().any(|e| e.index == entry.index) {
				tracing::warn!(
					store = store_name,
					line = lineno + 1,
					index = entry.index,
					"skipping cache entry with duplicate id"
				);
				continue;
			}
			entries.push(entry);
		}
		entries
	}

	/// Atomically overwrites the store file for `store_name`.
	///
	/// # Errors
	///
	/// Returns [`StoreError`] if the root directory cannot be created or the
	/// file cannot be written or renamed into place. The previous file
	/// contents survive any failure.
	pub fn save(&self, store_name: &str, entries: &[CacheEntry]) -> Result<(), StoreError> {
		fs::create_dir_all(&self.root).map_err(|source| StoreError::CreateDir {
			path: self.root.clone(),
			source,
		})?;

		let mut buf = String::new();
		for entry in entries {
			let line = serde_json::to_string(entry).map_err(|source| StoreError::Encode {
				name: entry.name.clone(),
				source,
			})?;
			buf.push_str(&line);
			buf.push('\n');
		}

		let path = self.path_for(store_name);
		let tmp = path.with_extension("jsonl.tmp");
		fs::write(&tmp, buf).map_err(|source| StoreError::Write {
			path: tmp.clone(),
			source,
		})?;
		fs::rename(&tmp, &path).map_err(|source| {
			let _ = fs::remove_file(&tmp);
			StoreError::Replace { path: path.clone(), source }
		})?;

		tracing::debug!(store = store_name, count = entries.len(), "cache store saved");
		Ok(())
	}
}
