use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SliceError {
	#[error(transparent)]
	#[diagnostic(code(gdslice::io_error))]
	Io(#[from] std::io::Error),

	#[error("{file}: the slice `{name}` does not have a closing tag")]
	#[diagnostic(
		code(gdslice::missing_closing_tag),
		help("add `# /EXPORT {name}` at the same indentation as the opening marker")
	)]
	MissingClosingTag { file: String, name: String },

	#[error("`{path}` doesn't exist or isn't accessible")]
	#[diagnostic(code(gdslice::path_not_found), help("check the project path"))]
	PathNotFound { path: String },

	#[error("no `{project_file}` file found in `{path}`")]
	#[diagnostic(
		code(gdslice::invalid_project),
		help("point `--path` at a Godot project root or pass `--no-project-check`")
	)]
	InvalidProject { path: String, project_file: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(gdslice::config_parse),
		help("check that gdslice.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("failed to serialize manifest: {0}")]
	#[diagnostic(code(gdslice::json))]
	Json(#[from] serde_json::Error),

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(gdslice::file_too_large),
		help("increase `max_file_size` in gdslice.toml or exclude this file")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(gdslice::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

pub type SliceResult<T> = Result<T, SliceError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
