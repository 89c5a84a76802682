use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Export tagged regions of GDScript files into a JSON manifest.",
	long_about = "gdslice scans a Godot project for `# EXPORT <name>` / `# /EXPORT <name>` \
	              comment pairs and writes a JSON manifest describing every slice it finds: \
	              its boundaries, its de-indented contents, and the text around it.\n\nA bare \
	              `# EXPORT` (or `# EXPORT *`) exports the whole file.\n\nQuick start:\n  \
	              gdslice export              Print the manifest to stdout\n  gdslice export -o \
	              slices.json Save the manifest to a file\n  gdslice list                \
	              Show every slice by file\n  gdslice check               Verify every marker \
	              is closed"
)]
pub struct GdsliceCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the Godot project root (the directory containing
	/// `project.godot`). Defaults to the current directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Scan the directory even if it has no `project.godot` file.
	#[arg(long, global = true, default_value_t = false)]
	pub no_project_check: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Build the slice manifest and print it or save it to a file.
	///
	/// Every `*.gd` file under the project root is scanned. Files without
	/// markers are left out of the manifest. A named marker without a matching
	/// closing tag aborts the export and nothing is written.
	Export {
		/// Save the manifest to this file instead of printing it.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// Emit single-line JSON instead of indented JSON.
		#[arg(long, default_value_t = false)]
		compact: bool,

		/// Watch for file changes and export again automatically.
		#[arg(long, default_value_t = false)]
		watch: bool,
	},
	/// List every file that contains slices, with the slice names and line
	/// ranges.
	List {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Verify that every marker in the project resolves, without writing a
	/// manifest.
	///
	/// Exits with a non-zero status code when a named slice has no closing
	/// tag. Useful in CI before publishing tutorial content.
	Check,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
