//! Build file parsing.
//!
//! The pipeline runs in three steps:
//!
//! 1. [`read_logical_lines`] reads a file and joins backslash continuations.
//! 2. [`load_and_flatten`] splices the root file's `include` directives.
//! 3. [`TargetTable::from_lines`] extracts target names, recipe bodies and
//!    prerequisite lists.
//!
//! Parsing is line-syntactic only: variables, conditionals and pattern rules
//! are not evaluated.
//!
//! # Examples
//!
//! ```
//! use makeshow::parser::{TargetTable, flatten_includes};
//! use camino::Utf8Path;
//!
//! let lines: Vec<String> = ["all: app", "\t@echo done", "app:", "\tcc -o app main.c"]
//!     .into_iter()
//!     .map(String::from)
//!     .collect();
//! let flat = flatten_includes(&lines, Utf8Path::new(".")).expect("no includes");
//! let table = TargetTable::from_lines(&flat);
//! assert_eq!(table.names().collect::<Vec<_>>(), vec!["all", "app"]);
//! ```

mod error;
mod include;
mod lines;
mod targets;

pub use error::LoadError;
pub use include::{flatten_includes, load_and_flatten};
pub use lines::{logical_lines, read_logical_lines};
pub use targets::{
    Declaration, DependencyMap, TargetEntry, TargetTable, compute_dependencies,
    extract_targets_and_definitions, target_name,
};
