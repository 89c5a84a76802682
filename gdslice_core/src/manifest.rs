use serde::Serialize;

use crate::SliceResult;
use crate::file_record::FileRecord;
use crate::normalize::normalize_source;
use crate::ordered_map::OrderedMap;
use crate::slice::Slice;
use crate::slice::resolve_slices;

/// The project-wide description of every slice, keyed by file path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectManifest {
	/// Paths of files that contain at least one slice, in traversal order.
	#[serde(rename = "files_paths")]
	pub file_paths: Vec<String>,
	pub files: OrderedMap<FileRecord>,
}

impl ProjectManifest {
	/// Build a manifest from `(relative path, raw text)` pairs.
	///
	/// Sources are processed in the order given. The first file that fails to
	/// resolve aborts the build and no manifest is returned.
	pub fn from_sources<I, P, T>(sources: I, resource_scheme: &str) -> SliceResult<Self>
	where
		I: IntoIterator<Item = (P, T)>,
		P: Into<String>,
		T: AsRef<str>,
	{
		let mut manifest = Self::default();

		for (file_path, raw) in sources {
			let file_path = file_path.into();
			let slices = extract_slices(&file_path, raw.as_ref())?;
			tracing::debug!(file = %file_path, slices = slices.len(), "scanned file");

			if let Some(record) = FileRecord::from_slices(file_path, slices, resource_scheme) {
				manifest.push(record);
			}
		}

		Ok(manifest)
	}

	fn push(&mut self, record: FileRecord) {
		if !self.files.contains_key(&record.file_path) {
			self.file_paths.push(record.file_path.clone());
		}
		self.files.insert(record.file_path.clone(), record);
	}

	pub fn file(&self, file_path: &str) -> Option<&FileRecord> {
		self.files.get(file_path)
	}

	pub fn is_empty(&self) -> bool {
		self.file_paths.is_empty()
	}

	/// Total number of slices across every file.
	pub fn slice_count(&self) -> usize {
		self.files.iter().map(|(_, record)| record.slices.len()).sum()
	}

	/// Serialize as indented JSON.
	pub fn to_json_pretty(&self) -> SliceResult<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/// Serialize as single-line JSON.
	pub fn to_json(&self) -> SliceResult<String> {
		Ok(serde_json::to_string(self)?)
	}
}

/// Normalize raw file text and resolve every slice in it.
pub fn extract_slices(file_path: &str, raw: &str) -> SliceResult<Vec<Slice>> {
	let content = normalize_source(raw);
	resolve_slices(file_path, &content)
}
