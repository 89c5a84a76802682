use std::path::Path;

/// A script with one whole-file marker and two named slices, indented with
/// spaces the way some editors save GDScript.
pub const PLAYER_SCRIPT: &str = "extends KinematicBody2D
# EXPORT

var speed := 200.0

# EXPORT movement
func _physics_process(delta):
    # EXPORT input
    var direction := get_direction()
    # /EXPORT input
    move_and_slide(direction * speed)
# /EXPORT movement
";

pub const ENEMY_SCRIPT: &str =
	"extends Node2D\n\n# EXPORT chase\nfunc chase(target):\n\tlook_at(target.position)\n# /EXPORT chase\n";

pub const PLAIN_SCRIPT: &str = "extends Node\n\nfunc _ready():\n\tpass\n";

pub const UNCLOSED_SCRIPT: &str = "extends Node\n# EXPORT foo\nfunc foo():\n\tpass\n";

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {relative}: {e}"));
}

/// Create a temporary Godot project containing the given files.
pub fn godot_project(files: &[(&str, &str)]) -> tempfile::TempDir {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	write_file(tmp.path(), "project.godot", "config_version=4\n");
	for (relative, content) in files {
		write_file(tmp.path(), relative, content);
	}
	tmp
}
