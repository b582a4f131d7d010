//! CLI execution and output dispatch.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! loads the Makefile, extracts its targets and prints what the command line
//! asked for.

mod error;
mod path_helpers;

pub use error::{EXIT_FAILURE, EXIT_NOT_FOUND, RunnerError};

use crate::chain::resolve_chain;
use crate::cli::Cli;
use crate::color_mode;
use crate::highlight::{Colorizer, Highlighter};
use crate::parser::{self, TargetTable};
use crate::render;
use path_helpers::{display_path, resolve_makefile_path};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Execute the parsed [`Cli`], writing regular output to `stdout` and
/// diagnostics to `stderr`.
///
/// # Errors
///
/// Returns an error if the Makefile or one of its includes is missing, if the
/// dependency chain cannot be resolved, or if writing output fails.
pub fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<(), RunnerError> {
    let highlighter = make_highlighter(cli, stderr)?;
    let colorizer = highlighter.as_ref().map(|h| h as &dyn Colorizer);

    let makefile = resolve_makefile_path(cli)?;
    if !makefile.is_file() {
        render::write_banner(stdout)?;
        return Err(RunnerError::MakefileNotFound {
            path: display_path(makefile.as_std_path()),
        });
    }

    let lines = parser::load_and_flatten(&makefile)?;
    let table = TargetTable::from_lines(lines.as_slice());
    debug!(makefile = %makefile, lines = lines.len(), targets = table.len(), "parsed Makefile");

    if cli.show_makefile_instead {
        render::write_entire_makefile(stdout, lines.as_slice(), colorizer)?;
        return Ok(());
    }

    if cli.targets.is_empty() {
        let names: Vec<&str> = table.names().collect();
        let shown_path = display_path(makefile.as_std_path());
        render::write_banner(stdout)?;
        render::write_usage(
            stdout,
            Some(shown_path.as_path()),
            Some(names.as_slice()),
            colorizer,
        )?;
        return Ok(());
    }

    let targets = if cli.show_dependencies {
        dependency_chain(&table, &cli.targets, stderr)?
    } else {
        cli.targets.clone()
    };
    render::write_target_definitions(
        stdout,
        |name| table.definition(name),
        targets.as_slice(),
        "",
        colorizer,
    )?;
    Ok(())
}

/// Build the highlighter unless colour is disabled.
///
/// Unknown scheme names disable colour with a warning on `stderr`.
fn make_highlighter(cli: &Cli, stderr: &mut dyn Write) -> io::Result<Option<Highlighter>> {
    if !color_mode::resolve(cli.disable_coloring).is_colored() {
        return Ok(None);
    }
    let highlighter = Highlighter::for_scheme(&cli.color_scheme);
    if highlighter.is_none() {
        warn!(scheme = %cli.color_scheme, "unknown color scheme");
        writeln!(
            stderr,
            "WARNING: Style '{}' not found. Coloring disabled.",
            cli.color_scheme
        )?;
    }
    Ok(highlighter)
}

/// Order `requested` and their prerequisites, reporting dropped cyclic edges
/// on `stderr`.
fn dependency_chain(
    table: &TargetTable,
    requested: &[String],
    stderr: &mut dyn Write,
) -> Result<Vec<String>, RunnerError> {
    let all: Vec<&str> = table.names().collect();
    let dependencies = table.dependencies_for(all.as_slice());
    let chain = resolve_chain(requested, &dependencies)?;
    for edge in chain.dropped_edges() {
        writeln!(stderr, "{edge}")?;
    }
    Ok(chain.into_names())
}
