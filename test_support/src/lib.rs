//! Test utilities for `makeshow` integration tests.
//!
//! Provides temporary directories populated with Makefiles and a launcher for
//! the compiled binary with a deterministic environment.

pub mod makefile_dir;

pub use makefile_dir::MakefileDir;

use anyhow::{Context, Result};
use assert_cmd::Command;

/// Build a command for the `makeshow` binary.
///
/// Colour is disabled through `NO_COLOR` and the environment overrides read
/// by the CLI are cleared, so output is stable across machines.
///
/// # Errors
///
/// Returns an error when the binary cannot be located.
pub fn makeshow_cmd() -> Result<Command> {
    let mut cmd = Command::cargo_bin("makeshow").context("locate makeshow binary")?;
    cmd.env("NO_COLOR", "1")
        .env_remove("MAKESHOW_MAKEFILE")
        .env_remove("MAKESHOW_COLOR_SCHEME");
    Ok(cmd)
}
