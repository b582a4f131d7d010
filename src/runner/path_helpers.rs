//! Path resolution helpers for the runner module.

use camino::Utf8PathBuf;
use std::path::{Path, PathBuf};

use super::RunnerError;
use crate::cli::Cli;

/// Convert the CLI Makefile path to UTF-8.
///
/// # Errors
/// Returns [`RunnerError::NonUtf8Path`] when the path is not valid UTF-8.
pub(super) fn resolve_makefile_path(cli: &Cli) -> Result<Utf8PathBuf, RunnerError> {
    Utf8PathBuf::from_path_buf(cli.makefile_path.clone())
        .map_err(|path| RunnerError::NonUtf8Path { path })
}

/// Absolute form of `path` for user-facing messages.
///
/// Falls back to `path` unchanged when the working directory is unavailable.
pub(super) fn display_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
