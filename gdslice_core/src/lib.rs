//! `gdslice_core` finds the regions that authors tag with marker comments in
//! GDScript files and describes them in a JSON manifest. Tutorial builders and
//! other downstream generators read that manifest to show code excerpts.
//!
//! ## Marker Syntax
//!
//! ```text
//! # EXPORT movement
//! func _physics_process(delta):
//! 	move_and_slide()
//! # /EXPORT movement
//! ```
//!
//! A marker without a name (or named `*`) exports the whole file. A named
//! marker must be closed by `# /EXPORT <name>` at the same indentation.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source file
//!   → Normalizer (unifies line endings, turns leading space runs into tabs)
//!   → Marker matcher (recognizes `# EXPORT <name>` lines)
//!   → Slice resolver (pairs openers with closers, slices and de-indents lines)
//!   → File record (slices keyed by name, in discovery order)
//!   → Project manifest (file records keyed by path, in traversal order)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `gdslice.toml`.
//! - [`project`] — Directory walking, project checks, and manifest building
//!   from disk.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gdslice_core::project::ScanOptions;
//! use gdslice_core::project::scan_project;
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let options = ScanOptions::load(root).unwrap();
//! let manifest = scan_project(root, &options).unwrap();
//! println!("{}", manifest.to_json_pretty().unwrap());
//! ```
//!
//! The core can also run without touching the filesystem:
//!
//! ```rust
//! use gdslice_core::ProjectManifest;
//!
//! let source = "# EXPORT demo\nline one\nline two\n# /EXPORT demo\n";
//! let manifest = ProjectManifest::from_sources([("demo.gd", source)], "res://").unwrap();
//! let slice = manifest.file("demo.gd").and_then(|file| file.slice("demo")).unwrap();
//! assert_eq!(slice.contents, "line one\nline two");
//! ```

pub use error::*;
pub use file_record::*;
pub use manifest::*;
pub use marker::*;
pub use normalize::*;
pub use ordered_map::*;
pub use slice::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod file_record;
mod manifest;
mod marker;
mod normalize;
mod ordered_map;
pub mod project;
mod slice;

#[cfg(test)]
mod __fixtures;
