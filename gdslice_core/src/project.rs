use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::SliceError;
use crate::SliceResult;
use crate::config::CONFIG_FILE_CANDIDATES;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::config::DEFAULT_PROJECT_FILE;
use crate::config::SliceConfig;
use crate::file_record::DEFAULT_RESOURCE_SCHEME;
use crate::manifest::ProjectManifest;

/// Options for controlling how a project is scanned.
///
/// Use [`ScanOptions::default()`] for sensible defaults or
/// [`ScanOptions::from_config`] to construct from a [`SliceConfig`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
	/// Extensions (without the dot) of the files to scan.
	pub extensions: Vec<String>,
	/// Prefix for each file's resource path.
	pub resource_scheme: String,
	/// File required at the project root. `None` skips the check.
	pub project_file: Option<String>,
	/// Gitignore-style patterns to exclude from scanning.
	pub exclude_patterns: Vec<String>,
	/// Maximum file size to scan in bytes.
	pub max_file_size: u64,
	/// Whether to disable `.gitignore` integration.
	pub disable_gitignore: bool,
}

impl Default for ScanOptions {
	fn default() -> Self {
		Self {
			extensions: vec!["gd".to_string()],
			resource_scheme: DEFAULT_RESOURCE_SCHEME.to_string(),
			project_file: Some(DEFAULT_PROJECT_FILE.to_string()),
			exclude_patterns: Vec::new(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
		}
	}
}

impl ScanOptions {
	/// Construct [`ScanOptions`] from a [`SliceConfig`], falling back to the
	/// defaults when no config was found.
	pub fn from_config(config: Option<&SliceConfig>) -> Self {
		let Some(config) = config else {
			return Self::default();
		};

		Self {
			extensions: config
				.extensions
				.iter()
				.map(|ext| ext.trim_start_matches('.').to_string())
				.collect(),
			resource_scheme: config.resource_scheme.clone(),
			project_file: Some(config.project_file.clone()).filter(|file| !file.is_empty()),
			exclude_patterns: config.exclude.patterns.clone(),
			max_file_size: config.max_file_size,
			disable_gitignore: config.disable_gitignore,
		}
	}

	/// Load the config discovered at `root` and build options from it.
	pub fn load(root: &Path) -> SliceResult<Self> {
		let config = SliceConfig::load(root)?;
		Ok(Self::from_config(config.as_ref()))
	}

	/// Whether a change to `path` can change the manifest: a source file with
	/// a scanned extension or one of the config files.
	pub fn affects_manifest(&self, path: &Path) -> bool {
		self.matches_extension(path)
			|| CONFIG_FILE_CANDIDATES
				.iter()
				.any(|candidate| path.ends_with(candidate))
	}

	fn matches_extension(&self, path: &Path) -> bool {
		let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
			return false;
		};

		self.extensions
			.iter()
			.any(|candidate| candidate.eq_ignore_ascii_case(ext))
	}
}

/// Check that `root` is a directory and, when a project file is configured,
/// that it exists at the root.
pub fn validate_project_root(root: &Path, options: &ScanOptions) -> SliceResult<()> {
	if !root.is_dir() {
		return Err(SliceError::PathNotFound {
			path: root.display().to_string(),
		});
	}

	if let Some(project_file) = &options.project_file {
		if !root.join(project_file).is_file() {
			return Err(SliceError::InvalidProject {
				path: root.display().to_string(),
				project_file: project_file.clone(),
			});
		}
	}

	Ok(())
}

/// Scan every matching file under `root` and build the project manifest.
///
/// This does not call [`validate_project_root`]; callers that need the
/// project checks run them first.
pub fn scan_project(root: &Path, options: &ScanOptions) -> SliceResult<ProjectManifest> {
	let files = collect_files(root, options)?;
	let sources = files
		.iter()
		.map(|file| {
			let content = read_source(file, options.max_file_size)?;
			Ok((relative_file_key(root, file), content))
		})
		.collect::<SliceResult<Vec<_>>>()?;

	let manifest = ProjectManifest::from_sources(sources, &options.resource_scheme)?;
	tracing::info!(
		scanned = files.len(),
		files = manifest.file_paths.len(),
		slices = manifest.slice_count(),
		"built manifest"
	);

	Ok(manifest)
}

/// Load the config at `root`, then scan it.
pub fn scan_project_with_config(root: &Path) -> SliceResult<ProjectManifest> {
	let options = ScanOptions::load(root)?;
	scan_project(root, &options)
}

fn read_source(file: &Path, max_file_size: u64) -> SliceResult<String> {
	let metadata = std::fs::metadata(file)?;
	if metadata.len() > max_file_size {
		return Err(SliceError::FileTooLarge {
			path: file.display().to_string(),
			size: metadata.len(),
			limit: max_file_size,
		});
	}

	Ok(std::fs::read_to_string(file)?)
}

/// The path of `file` relative to `root`, with forward slashes.
pub fn relative_file_key(root: &Path, file: &Path) -> String {
	file.strip_prefix(root)
		.unwrap_or(file)
		.to_string_lossy()
		.replace('\\', "/")
}

/// Build a `Gitignore` matcher from exclude patterns specified in
/// `gdslice.toml` `[exclude]`.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> SliceResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			SliceError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| SliceError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Build a `Gitignore` matcher from the project's `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		let _ = builder.add(gitignore_path);
	}
	builder.build().unwrap_or_else(|_| Gitignore::empty())
}

/// Collect every file under `root` whose extension is one of
/// `options.extensions`.
///
/// Hidden directories are skipped, as are paths matched by the project's
/// `.gitignore` (unless disabled) and by the configured exclude patterns. The
/// result is sorted, which gives a depth-first, alphabetical traversal order.
pub fn collect_files(root: &Path, options: &ScanOptions) -> SliceResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	let mut visited_dirs = HashSet::new();

	let gitignore = if options.disable_gitignore {
		Gitignore::empty()
	} else {
		build_gitignore(root)
	};
	let custom_exclude = build_exclude_matcher(root, &options.exclude_patterns)?;

	walk_dir(
		root,
		options,
		&mut files,
		&gitignore,
		&custom_exclude,
		&mut visited_dirs,
	)?;
	files.sort();
	Ok(files)
}

fn walk_dir(
	dir: &Path,
	options: &ScanOptions,
	files: &mut Vec<PathBuf>,
	gitignore: &Gitignore,
	custom_exclude: &Gitignore,
	visited_dirs: &mut HashSet<PathBuf>,
) -> SliceResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// Detect symlink cycles by tracking canonical paths.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited_dirs.insert(canonical) {
		return Err(SliceError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		let is_dir = path.is_dir();

		// Hidden directories hold editor and VCS state (`.godot`, `.git`).
		if is_dir
			&& path
				.file_name()
				.and_then(|n| n.to_str())
				.is_some_and(|name| name.starts_with('.'))
		{
			continue;
		}

		if gitignore.matched(&path, is_dir).is_ignore()
			|| custom_exclude.matched(&path, is_dir).is_ignore()
		{
			continue;
		}

		if is_dir {
			walk_dir(
				&path,
				options,
				files,
				gitignore,
				custom_exclude,
				visited_dirs,
			)?;
		} else if options.matches_extension(&path) {
			files.push(path);
		}
	}

	Ok(())
}
