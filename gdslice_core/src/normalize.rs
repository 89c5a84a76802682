//! Canonical text form that the marker matcher and slice resolver operate on.

/// The character a single level of leading indentation is normalized to.
pub const INDENT_UNIT: char = '\t';

/// Normalize CRLF and bare CR line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
	if content.contains('\r') {
		content.replace("\r\n", "\n").replace('\r', "\n")
	} else {
		content.to_string()
	}
}

/// Convert raw file text into its canonical, line-splittable form.
///
/// Line endings become `\n`, then on every line a leading run of two or more
/// spaces is replaced by the same number of [`INDENT_UNIT`] characters. A
/// lone leading space and spaces after the first non-space character are
/// kept as they are.
pub fn normalize_source(content: &str) -> String {
	let content = normalize_line_endings(content);
	let mut output = String::with_capacity(content.len());

	for (index, line) in content.split('\n').enumerate() {
		if index > 0 {
			output.push('\n');
		}

		let leading = line.len() - line.trim_start_matches(' ').len();
		if leading >= 2 {
			output.extend(std::iter::repeat_n(INDENT_UNIT, leading));
			output.push_str(&line[leading..]);
		} else {
			output.push_str(line);
		}
	}

	output
}

/// Split normalized text into lines. A trailing newline produces a final empty
/// line so that joining the lines with `\n` reproduces the text exactly.
pub fn split_lines(content: &str) -> Vec<&str> {
	content.split('\n').collect()
}

/// Remove at most `depth` leading whitespace characters from `line`.
///
/// Indentation units are counted, not inspected, so any whitespace character
/// in the prefix counts as one unit.
pub fn strip_indent(line: &str, depth: usize) -> &str {
	if depth == 0 {
		return line;
	}

	let offset = line
		.char_indices()
		.take(depth)
		.take_while(|(_, ch)| ch.is_whitespace())
		.last()
		.map_or(0, |(index, ch)| index + ch.len_utf8());

	&line[offset..]
}

/// De-indent every line by `depth` units and join the result with `\n`.
pub fn dedent_lines(lines: &[&str], depth: usize) -> String {
	lines
		.iter()
		.map(|line| strip_indent(line, depth))
		.collect::<Vec<_>>()
		.join("\n")
}
