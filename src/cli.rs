//! Command line interface definition using clap.
//!
//! This module only depends on `clap` and `std` so that `build.rs` can include
//! it to render the manual page.

use clap::Parser;
use std::path::PathBuf;

/// Show definitions of Makefile targets in the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "makeshow", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the Makefile to show definitions from.
    #[arg(
        short = 'm',
        long,
        alias = "makefile_path",
        value_name = "FILE",
        default_value = "Makefile",
        env = "MAKESHOW_MAKEFILE"
    )]
    pub makefile_path: PathBuf,

    /// Also show definitions of the targets that the given targets depend on.
    #[arg(short = 'd', long, alias = "show_dependencies")]
    pub show_dependencies: bool,

    /// Show the Makefile (including its included files) instead of target
    /// definitions.
    #[arg(short = 's', long, alias = "show_makefile_instead")]
    pub show_makefile_instead: bool,

    /// Never color Makefile contents.
    #[arg(short = 'n', long, alias = "disable_coloring")]
    pub disable_coloring: bool,

    /// Color scheme used for Makefile contents.
    ///
    /// One of: one-dark, monokai, solarized-dark, solarized-light.
    #[arg(
        short = 'c',
        long,
        alias = "color_scheme",
        value_name = "SCHEME",
        default_value = "one-dark",
        env = "MAKESHOW_COLOR_SCHEME"
    )]
    pub color_scheme: String,

    /// Enable verbose diagnostic logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// One or more Makefile target names to show definitions of.
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

impl Cli {
    /// Parse the provided arguments.
    ///
    /// # Panics
    ///
    /// Panics if argument parsing fails.
    #[must_use]
    pub fn parse_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).unwrap_or_else(|e| panic!("CLI parsing failed: {e}"))
    }
}
