use std::sync::LazyLock;

use regex::Regex;

/// Keyword that identifies an export marker comment.
pub const EXPORT_KEYWORD: &str = "EXPORT";

/// Name used for slices that capture the whole file.
pub const WHOLE_FILE_NAME: &str = "*";

/// Grammar of an opening marker line, applied to normalized lines.
///
/// Group 1 is the indentation prefix, group 2 the keyword and group 3 the
/// optional slice name.
pub const OPEN_MARKER_PATTERN: &str = r"^(\s*)#\s(EXPORT)(?:\s+(.*?))?(?:\s|$)";

static OPEN_MARKER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(OPEN_MARKER_PATTERN)
		.unwrap_or_else(|e| panic!("invalid open marker pattern: {e}"))
});

/// An opening marker found on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
	/// The leading whitespace exactly as it appears on the line.
	pub prefix: &'a str,
	/// Number of indentation units in `prefix`.
	pub indent: usize,
	/// The slice name. `None` when the marker captures the whole file.
	pub name: Option<&'a str>,
}

impl<'a> Marker<'a> {
	pub fn is_whole_file(&self) -> bool {
		self.name.is_none()
	}

	/// The name this marker's slice is stored under.
	pub fn slice_name(&self) -> &'a str {
		self.name.unwrap_or(WHOLE_FILE_NAME)
	}

	/// The closing tag that ends this marker's slice.
	pub fn closing_tag(&self) -> ClosingTag<'a> {
		ClosingTag {
			prefix: self.prefix,
			name: self.slice_name(),
		}
	}
}

/// Match a normalized line against the opening marker grammar.
pub fn match_marker(line: &str) -> Option<Marker<'_>> {
	let captures = OPEN_MARKER.captures(line)?;
	let prefix = captures.get(1).map_or("", |m| m.as_str());
	let name = captures
		.get(3)
		.map(|m| m.as_str())
		.filter(|name| !name.is_empty() && *name != WHOLE_FILE_NAME);

	Some(Marker {
		prefix,
		indent: prefix.chars().count(),
		name,
	})
}

/// The line that closes a named slice: the opener's indentation prefix, then
/// `# /EXPORT <name>` and nothing but trailing whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosingTag<'a> {
	pub prefix: &'a str,
	pub name: &'a str,
}

impl ClosingTag<'_> {
	pub fn matches(&self, line: &str) -> bool {
		line.strip_prefix(self.prefix)
			.and_then(|rest| rest.strip_prefix("# /"))
			.and_then(|rest| rest.strip_prefix(EXPORT_KEYWORD))
			.and_then(|rest| rest.strip_prefix(' '))
			.and_then(|rest| rest.strip_prefix(self.name))
			.is_some_and(|rest| rest.chars().all(char::is_whitespace))
	}
}

impl std::fmt::Display for ClosingTag<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}# /{EXPORT_KEYWORD} {}", self.prefix, self.name)
	}
}
