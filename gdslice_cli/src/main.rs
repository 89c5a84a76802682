use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use gdslice_cli::Commands;
use gdslice_cli::GdsliceCli;
use gdslice_cli::OutputFormat;
use gdslice_core::ProjectManifest;
use gdslice_core::SliceError;
use gdslice_core::project::ScanOptions;
use gdslice_core::project::scan_project;
use gdslice_core::project::validate_project_root;
use owo_colors::AnsiColors;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: AtomicBool = AtomicBool::new(true);

/// Color `text` unless colors were turned off with `--no-color` or
/// `NO_COLOR`.
fn paint(text: &str, color: AnsiColors) -> String {
	if USE_COLOR.load(Ordering::Relaxed) {
		text.color(color).to_string()
	} else {
		text.to_string()
	}
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
	let args = GdsliceCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Export {
			output,
			compact,
			watch,
		}) => run_export(&args, output.as_deref(), *compact, *watch),
		Some(Commands::List { format }) => run_list(&args, *format),
		Some(Commands::Check) => run_check(&args),
		None => {
			eprintln!("No subcommand specified. Run `gdslice --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Render core errors through miette for help text and error codes.
		match e.downcast::<SliceError>() {
			Ok(slice_err) => {
				let report: miette::Report = (*slice_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", paint("error:", AnsiColors::Red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `GDSLICE_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_env("GDSLICE_LOG")
		.unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.try_init()
		.ok();
}

fn resolve_root(args: &GdsliceCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Load the scan options for the project and run the project checks.
fn prepare_scan(args: &GdsliceCli) -> CliResult<(PathBuf, ScanOptions)> {
	let root = resolve_root(args);
	let mut options = ScanOptions::load(&root)?;
	if args.no_project_check {
		options.project_file = None;
	}
	validate_project_root(&root, &options)?;

	Ok((root, options))
}

fn scan(args: &GdsliceCli) -> CliResult<ProjectManifest> {
	let (root, options) = prepare_scan(args)?;
	let manifest = scan_project(&root, &options)?;

	if args.verbose {
		eprintln!(
			"Scanned project: {} file(s) with {} slice(s)",
			manifest.file_paths.len(),
			manifest.slice_count()
		);
	}

	Ok(manifest)
}

fn run_export(
	args: &GdsliceCli,
	output: Option<&Path>,
	compact: bool,
	watch: bool,
) -> CliResult<()> {
	run_export_once(args, output, compact)?;

	if !watch {
		return Ok(());
	}

	let root = resolve_root(args).canonicalize()?;
	let options = ScanOptions::load(&root)?;
	// Writing the manifest must not count as a change to the project.
	let output = output.map(Path::to_path_buf);
	let written = output
		.as_deref()
		.map(|path| path.canonicalize().unwrap_or_else(|_| path.to_path_buf()));

	let (tx, rx) = mpsc::channel();
	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			let Ok(event) = res else {
				return;
			};
			let relevant_kind = matches!(
				event.kind,
				notify::EventKind::Modify(_)
					| notify::EventKind::Create(_)
					| notify::EventKind::Remove(_)
			);
			let relevant_path = event.paths.iter().any(|path| {
				written.as_deref() != Some(path.as_path()) && options.affects_manifest(path)
			});

			if relevant_kind && relevant_path {
				let _ = tx.send(());
			}
		})?;

	use notify::Watcher;
	watcher.watch(&root, notify::RecursiveMode::Recursive)?;
	eprintln!("\nWatching for file changes... (press Ctrl+C to stop)");

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		eprintln!("\nFile change detected, exporting...");
		if let Err(e) = run_export_once(args, output.as_deref(), compact) {
			eprintln!("{} {e}", paint("error:", AnsiColors::Red));
		}
	}
}

fn run_export_once(args: &GdsliceCli, output: Option<&Path>, compact: bool) -> CliResult<()> {
	let manifest = scan(args)?;
	let json = if compact {
		manifest.to_json()?
	} else {
		manifest.to_json_pretty()?
	};

	let Some(path) = output else {
		println!("{json}");
		return Ok(());
	};

	if std::fs::read_to_string(path).is_ok_and(|existing| existing == json) {
		println!("\"{}\" is already up to date", path.display());
		return Ok(());
	}

	println!("will write generated config to \"{}\"", path.display());
	std::fs::write(path, json)?;

	Ok(())
}

fn run_list(args: &GdsliceCli, format: OutputFormat) -> CliResult<()> {
	let manifest = scan(args)?;

	if let OutputFormat::Json = format {
		let files: Vec<serde_json::Value> = manifest
			.files
			.iter()
			.map(|(path, record)| {
				let slices: Vec<serde_json::Value> = record
					.slices
					.iter()
					.map(|(name, slice)| {
						serde_json::json!({
							"name": name,
							"all": slice.whole_file,
							"start": slice.start,
							"end": slice.end,
						})
					})
					.collect();
				serde_json::json!({
					"file": path,
					"godot_path": record.resource_path,
					"slices": slices,
				})
			})
			.collect();
		println!("{}", serde_json::json!({ "files": files }));
		return Ok(());
	}

	if manifest.is_empty() {
		println!("No slices found.");
		return Ok(());
	}

	for (path, record) in manifest.files.iter() {
		println!("{} ({})", paint(path, AnsiColors::Cyan), record.resource_path);
		for (name, slice) in record.slices.iter() {
			if slice.whole_file {
				println!("  {name} whole file");
			} else {
				println!("  {name} lines {}..{}", slice.start, slice.end);
			}
		}
	}

	println!(
		"\n{} file(s), {} slice(s)",
		manifest.file_paths.len(),
		manifest.slice_count()
	);

	Ok(())
}

fn run_check(args: &GdsliceCli) -> CliResult<()> {
	let manifest = scan(args)?;
	println!(
		"{} {} slice(s) in {} file(s) resolved.",
		paint("Check passed:", AnsiColors::Green),
		manifest.slice_count(),
		manifest.file_paths.len()
	);

	Ok(())
}
