#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn gdslice_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("gdslice"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("GDSLICE_LOG");
	cmd
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}

/// Create a temporary Godot project containing the given files.
pub fn godot_project(files: &[(&str, &str)]) -> std::io::Result<tempfile::TempDir> {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "project.godot", "config_version=4\n")?;
	for (relative, content) in files {
		write_file(tmp.path(), relative, content)?;
	}
	Ok(tmp)
}
