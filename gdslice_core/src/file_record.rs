use serde::Serialize;

use crate::ordered_map::OrderedMap;
use crate::slice::Slice;

/// Scheme prefix Godot uses for paths relative to the project root.
pub const DEFAULT_RESOURCE_SCHEME: &str = "res://";

/// Every slice found in one file, together with the file's path metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
	/// Path relative to the project root, using forward slashes.
	pub file_path: String,
	/// Directory portion of `file_path`, `.` for files at the root.
	pub dir_name: String,
	/// File name without its extension.
	pub file_name: String,
	/// `file_path` prefixed with the resource scheme, e.g. `res://player.gd`.
	#[serde(rename = "godot_path")]
	pub resource_path: String,
	/// Slice names in the order they were first found.
	#[serde(rename = "slices_names")]
	pub slice_names: Vec<String>,
	pub slices: OrderedMap<Slice>,
}

impl FileRecord {
	/// Collect the slices of one file into a record.
	///
	/// Returns `None` when `slices` is empty so that files without markers
	/// don't show up in the manifest. When two slices share a name the later
	/// one wins, but the name keeps the position where it was first seen.
	pub fn from_slices(
		file_path: impl Into<String>,
		slices: Vec<Slice>,
		resource_scheme: &str,
	) -> Option<Self> {
		if slices.is_empty() {
			return None;
		}

		let file_path = file_path.into();
		let slices: OrderedMap<Slice> = slices
			.into_iter()
			.map(|slice| (slice.name.clone(), slice))
			.collect();

		Some(Self {
			dir_name: dir_name(&file_path).to_string(),
			file_name: file_stem(&file_path).to_string(),
			resource_path: format!("{resource_scheme}{file_path}"),
			slice_names: slices.keys().to_vec(),
			slices,
			file_path,
		})
	}

	pub fn slice(&self, name: &str) -> Option<&Slice> {
		self.slices.get(name)
	}
}

fn dir_name(file_path: &str) -> &str {
	match file_path.rsplit_once('/') {
		Some(("", _)) => "/",
		Some((dir, _)) => dir,
		None => ".",
	}
}

fn file_stem(file_path: &str) -> &str {
	let base = file_path.rsplit_once('/').map_or(file_path, |(_, base)| base);
	match base.rfind('.') {
		Some(0) | None => base,
		Some(dot) => &base[..dot],
	}
}
