//! Error types for the runner module.
//!
//! This submodule isolates derive-macro-affected code to scope lint suppressions
//! narrowly. The `unused_assignments` lint fires in some Rust versions due to
//! thiserror/miette derive macro expansion.

// `#[expect]` fails when the version-dependent lint does not fire, so `#[allow]`
// is required here.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use crate::chain::ChainError;
use crate::parser::LoadError;
use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code used when the Makefile or one of its includes is missing.
pub const EXIT_NOT_FOUND: u8 = 17;
/// Exit code used for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Errors raised while running `makeshow`.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The Makefile does not exist at the expected path.
    #[error("Makefile not found:\n  \"{}\"", .path.display())]
    #[diagnostic(
        code(makeshow::runner::makefile_not_found),
        help(
            "Please run in a folder that contains a Makefile or use `-m` / `--makefile-path` to specify the Makefile path."
        )
    )]
    MakefileNotFound {
        /// Absolute form of the path that was attempted.
        path: PathBuf,
    },

    /// The Makefile path cannot be represented as UTF-8.
    #[error("Makefile path is not valid UTF-8: {}", .path.display())]
    #[diagnostic(code(makeshow::runner::non_utf8_path))]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// Loading the Makefile or an included file failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    /// Resolving the dependency chain failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Chain(#[from] ChainError),

    /// Writing to stdout or stderr failed.
    #[error("failed to write output")]
    #[diagnostic(code(makeshow::runner::output))]
    Output(#[from] io::Error),
}

impl RunnerError {
    /// Process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MakefileNotFound { .. } => EXIT_NOT_FOUND,
            Self::Load(err) if err.is_not_found() => EXIT_NOT_FOUND,
            _ => EXIT_FAILURE,
        }
    }

    /// Whether the failure is a closed output pipe, such as `makeshow | head`.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(err) if err.kind() == io::ErrorKind::BrokenPipe)
    }
}
