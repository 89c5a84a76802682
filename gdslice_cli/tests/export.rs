mod common;

use gdslice_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;
use serde_json::Value;
use similar_asserts::assert_eq;

const PLAYER_SCRIPT: &str = "extends KinematicBody2D\n# EXPORT\n\n# EXPORT movement\nfunc \
                             _physics_process(delta):\n  move_and_slide()\n# /EXPORT movement\n";

#[test]
fn export_prints_manifest_to_stdout() -> AnyEmptyResult {
	let tmp = common::godot_project(&[
		("player.gd", PLAYER_SCRIPT),
		("plain.gd", "extends Node\n"),
	])?;

	let output = common::gdslice_cmd()
		.arg("export")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let manifest: Value = serde_json::from_slice(&output)?;
	assert_eq!(manifest["files_paths"], serde_json::json!(["player.gd"]));

	let player = &manifest["files"]["player.gd"];
	assert_eq!(player["godot_path"], "res://player.gd");
	assert_eq!(player["slices_names"], serde_json::json!(["*", "movement"]));
	assert_eq!(
		player["slices"]["movement"]["contents"],
		"func _physics_process(delta):\n\t\tmove_and_slide()"
	);
	assert_eq!(player["slices"]["movement"]["start"], 5);
	assert_eq!(player["slices"]["movement"]["end"], 7);

	Ok(())
}

#[test]
fn export_keeps_manifest_key_order() -> AnyEmptyResult {
	let tmp = common::godot_project(&[(
		"b.gd",
		"# EXPORT zeta\n# /EXPORT zeta\n# EXPORT alpha\n# /EXPORT alpha\n",
	)])?;

	let output = common::gdslice_cmd()
		.arg("export")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();
	let stdout = String::from_utf8(output)?;

	let files_paths = stdout.find("\"files_paths\"").unwrap_or(usize::MAX);
	let files = stdout.find("\"files\":").unwrap_or(0);
	assert!(files_paths < files, "files_paths should come first:\n{stdout}");

	let zeta = stdout.find("\"zeta\": {").unwrap_or(usize::MAX);
	let alpha = stdout.find("\"alpha\": {").unwrap_or(0);
	assert!(zeta < alpha, "slices should keep discovery order:\n{stdout}");

	Ok(())
}

#[test]
fn export_writes_output_file() -> AnyEmptyResult {
	let tmp = common::godot_project(&[("player.gd", PLAYER_SCRIPT)])?;
	let output_path = tmp.path().join("slices.json");

	common::gdslice_cmd()
		.arg("export")
		.arg("--path")
		.arg(tmp.path())
		.arg("--output")
		.arg(&output_path)
		.assert()
		.success()
		.stdout(predicates::str::contains("will write generated config to"));

	let manifest: Value = serde_json::from_str(&std::fs::read_to_string(&output_path)?)?;
	assert_eq!(manifest["files_paths"], serde_json::json!(["player.gd"]));

	Ok(())
}

#[test]
fn export_leaves_unchanged_output_file_alone() -> AnyEmptyResult {
	let tmp = common::godot_project(&[("player.gd", PLAYER_SCRIPT)])?;
	let output_path = tmp.path().join("slices.json");

	let export = || {
		let mut cmd = common::gdslice_cmd();
		cmd.arg("export")
			.arg("--path")
			.arg(tmp.path())
			.arg("-o")
			.arg(&output_path);
		cmd
	};

	export()
		.assert()
		.success()
		.stdout(predicates::str::contains("will write generated config to"));
	export()
		.assert()
		.success()
		.stdout(predicates::str::contains("is already up to date"))
		.stdout(predicates::str::contains("will write").not());

	Ok(())
}

#[test]
fn export_compact_is_single_line() -> AnyEmptyResult {
	let tmp = common::godot_project(&[("player.gd", PLAYER_SCRIPT)])?;

	let output = common::gdslice_cmd()
		.arg("export")
		.arg("--compact")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();
	let stdout = String::from_utf8(output)?;

	assert_eq!(stdout.trim_end().lines().count(), 1);
	assert!(stdout.starts_with("{\"files_paths\":[\"player.gd\"]"));

	Ok(())
}

#[test]
fn export_fails_on_missing_closing_tag_without_output() -> AnyEmptyResult {
	let tmp = common::godot_project(&[
		("a.gd", PLAYER_SCRIPT),
		("b.gd", "# EXPORT foo\nfunc foo():\n\tpass\n"),
	])?;
	let output_path = tmp.path().join("slices.json");

	common::gdslice_cmd()
		.arg("export")
		.arg("--path")
		.arg(tmp.path())
		.arg("-o")
		.arg(&output_path)
		.assert()
		.code(2)
		.stdout(predicates::str::contains("will write").not())
		.stderr(predicates::str::contains("b.gd"))
		.stderr(predicates::str::contains("does not have a closing tag"));

	assert!(!output_path.exists());

	Ok(())
}

#[rstest]
#[case::export_missing_path("export", false, "doesn't")]
#[case::export_missing_project_file("export", true, "project.godot")]
#[case::list_missing_path("list", false, "doesn't")]
#[case::check_missing_project_file("check", true, "project.godot")]
fn commands_reject_invalid_project_root(
	#[case] command: &str,
	#[case] create_root: bool,
	#[case] expected: &str,
) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let root = if create_root {
		common::write_file(tmp.path(), "main.gd", "# EXPORT\n")?;
		tmp.path().to_path_buf()
	} else {
		tmp.path().join("nope")
	};

	common::gdslice_cmd()
		.arg(command)
		.arg("--path")
		.arg(&root)
		.assert()
		.code(2)
		.stderr(predicates::str::contains(expected));

	Ok(())
}

#[test]
fn export_skips_project_check_when_asked() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "main.gd", "# EXPORT\n")?;

	common::gdslice_cmd()
		.arg("export")
		.arg("--no-project-check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("main.gd"));

	Ok(())
}

#[test]
fn export_respects_configured_project_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "gdslice.toml", "project_file = \"\"\n")?;
	common::write_file(tmp.path(), "main.gd", "# EXPORT\n")?;

	common::gdslice_cmd()
		.arg("export")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	Ok(())
}

#[test]
fn export_with_no_slices_prints_empty_manifest() -> AnyEmptyResult {
	let tmp = common::godot_project(&[("plain.gd", "extends Node\n")])?;

	let output = common::gdslice_cmd()
		.arg("export")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let manifest: Value = serde_json::from_slice(&output)?;
	assert_eq!(manifest, serde_json::json!({ "files_paths": [], "files": {} }));

	Ok(())
}

#[test]
fn no_subcommand_prints_usage_hint() {
	common::gdslice_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("gdslice --help"));
}
