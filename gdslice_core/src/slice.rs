use serde::Serialize;

use crate::SliceError;
use crate::SliceResult;
use crate::marker::Marker;
use crate::marker::match_marker;
use crate::normalize::dedent_lines;
use crate::normalize::split_lines;

/// A named or whole-file region extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
	/// `true` when the marker had no name and the slice captures the whole
	/// file.
	#[serde(rename = "all")]
	pub whole_file: bool,
	/// The slice name, `*` for whole-file slices.
	pub name: String,
	/// Every line up to and including the opening marker.
	pub before: String,
	/// Every line after the closing marker.
	pub after: String,
	/// The captured lines with `indent` indentation units removed.
	pub contents: String,
	/// Indentation depth of the opening marker.
	pub indent: usize,
	/// 1-indexed line number of the first captured line. For a whole-file
	/// slice this is the line of the marker itself.
	pub start: usize,
	/// 1-indexed, exclusive end of the captured region. For a named slice this
	/// is the line number of the closing marker.
	pub end: usize,
	/// The captured lines exactly as they appear in the normalized file.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub original: Option<String>,
}

impl Slice {
	fn capture_file(lines: &[&str], marker: &Marker<'_>, opener: usize) -> Self {
		Self {
			whole_file: true,
			name: marker.slice_name().to_string(),
			before: String::new(),
			after: String::new(),
			contents: dedent_lines(lines, marker.indent),
			indent: marker.indent,
			start: opener + 1,
			end: lines.len() + 1,
			original: None,
		}
	}

	fn capture_region(lines: &[&str], marker: &Marker<'_>, opener: usize, closer: usize) -> Self {
		let captured = &lines[opener + 1..closer];

		Self {
			whole_file: false,
			name: marker.slice_name().to_string(),
			before: lines[..=opener].join("\n"),
			after: lines[closer + 1..].join("\n"),
			contents: dedent_lines(captured, marker.indent),
			indent: marker.indent,
			start: opener + 2,
			end: closer + 1,
			original: Some(captured.join("\n")),
		}
	}
}

/// Find every marker in `content` and resolve it into a [`Slice`].
///
/// `content` must already be normalized with
/// [`normalize_source`](crate::normalize_source). Slices are returned in the
/// order their markers appear. A named marker without a matching closing tag
/// at the same indentation fails the whole file with
/// [`SliceError::MissingClosingTag`].
pub fn resolve_slices(file_path: &str, content: &str) -> SliceResult<Vec<Slice>> {
	let lines = split_lines(content);
	let mut slices = Vec::new();

	for (index, line) in lines.iter().enumerate() {
		let Some(marker) = match_marker(line) else {
			continue;
		};

		if marker.is_whole_file() {
			slices.push(Slice::capture_file(&lines, &marker, index));
			continue;
		}

		let closing = marker.closing_tag();
		let Some(offset) = lines[index + 1..]
			.iter()
			.position(|candidate| closing.matches(candidate))
		else {
			return Err(SliceError::MissingClosingTag {
				file: file_path.to_string(),
				name: marker.slice_name().to_string(),
			});
		};

		let slice = Slice::capture_region(&lines, &marker, index, index + 1 + offset);
		tracing::trace!(
			file = file_path,
			name = %slice.name,
			start = slice.start,
			end = slice.end,
			"resolved slice"
		);
		slices.push(slice);
	}

	Ok(slices)
}
