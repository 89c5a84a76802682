use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::SliceError;
use crate::SliceResult;
use crate::file_record::DEFAULT_RESOURCE_SCHEME;

/// Default maximum file size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["gdslice.toml", ".gdslice.toml", ".config/gdslice.toml"];

/// File that marks the root of a Godot project.
pub const DEFAULT_PROJECT_FILE: &str = "project.godot";

/// Configuration loaded from a `gdslice.toml` file.
///
/// ```toml
/// extensions = ["gd"]
/// resource_scheme = "res://"
/// project_file = "project.godot"
/// max_file_size = 10485760
/// disable_gitignore = false
///
/// [exclude]
/// patterns = ["addons/", "*.tmp.gd"]
/// ```
#[derive(Debug, Deserialize)]
pub struct SliceConfig {
	/// File extensions to scan, without the leading dot. Matching ignores
	/// case.
	#[serde(default = "default_extensions")]
	pub extensions: Vec<String>,
	/// Prefix joined with each relative file path to build its resource path.
	#[serde(default = "default_resource_scheme")]
	pub resource_scheme: String,
	/// File that must exist at the root for the directory to count as a
	/// project. An empty string disables the check.
	#[serde(default = "default_project_file")]
	pub project_file: String,
	/// Maximum file size in bytes to scan. Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
	/// When true, `.gitignore` files are not used for filtering.
	#[serde(default)]
	pub disable_gitignore: bool,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
}

impl Default for SliceConfig {
	fn default() -> Self {
		Self {
			extensions: default_extensions(),
			resource_scheme: default_resource_scheme(),
			project_file: default_project_file(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
			exclude: ExcludeConfig::default(),
		}
	}
}

/// Configuration for excluding files and directories from scanning.
///
/// Patterns follow gitignore syntax and are applied on top of any `.gitignore`
/// rules (unless `disable_gitignore` is set).
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	/// Gitignore-style patterns relative to the project root.
	///
	/// Examples: `"addons/"`, `"*.generated.gd"`, `"!addons/tutorial/"`.
	#[serde(default)]
	pub patterns: Vec<String>,
}

fn default_extensions() -> Vec<String> {
	vec!["gd".to_string()]
}

fn default_resource_scheme() -> String {
	DEFAULT_RESOURCE_SCHEME.to_string()
}

fn default_project_file() -> String {
	DEFAULT_PROJECT_FILE.to_string()
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

impl SliceConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> SliceResult<Option<SliceConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let config: SliceConfig =
			toml::from_str(&content).map_err(|e| SliceError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}
}
