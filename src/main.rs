//! Application entry point.
//!
//! Parses command-line arguments and delegates execution to [`runner::run`].

use clap::Parser;
use makeshow::{cli::Cli, runner, runner::RunnerError};
use miette::Diagnostic;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    fmt().with_writer(io::stderr).with_max_level(max_level).init();
    match runner::run(&cli, &mut io::stdout(), &mut io::stderr()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_broken_pipe() => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "runner failed");
            if report(&err, &mut io::stderr()).is_err() {
                return ExitCode::from(runner::EXIT_FAILURE);
            }
            ExitCode::from(err.exit_code())
        }
    }
}

/// Write `err` and its help text to `out`.
fn report(err: &RunnerError, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "ERROR: {err}")?;
    if let Some(help) = err.help() {
        writeln!(out, "\n{help}\n")?;
    }
    Ok(())
}
