//! Build script for `makeshow`.
//!
//! Renders the `makeshow(1)` manual page from the clap definition in
//! `src/cli.rs` into `target/generated-man/`, where release packaging picks
//! it up.

use clap::CommandFactory;
use clap_mangen::Man;
use std::error::Error;
use std::path::Path;
use std::{env, fs};

#[path = "src/cli.rs"]
#[expect(
    dead_code,
    reason = "Only type definitions are needed for man page generation"
)]
mod cli;

/// Directory, relative to the package root, that receives the manual page.
const MAN_DIR: &str = "target/generated-man";

/// Inputs that change the rendered page.
const WATCHED_ENV: &[&str] = &["CARGO_PKG_NAME", "CARGO_PKG_VERSION", "CARGO_PKG_DESCRIPTION"];

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");
    for key in WATCHED_ENV {
        println!("cargo:rerun-if-env-changed={key}");
    }

    let page = page_name()?;
    let mut rendered = Vec::new();
    Man::new(cli::Cli::command()).render(&mut rendered)?;

    let dir = Path::new(MAN_DIR);
    fs::create_dir_all(dir)?;
    fs::write(dir.join(page), rendered)?;
    Ok(())
}

/// File name of the page, `<command>.1`.
///
/// Fails when the clap command name drifts from the package name, since
/// packaging installs the page under the package name.
fn page_name() -> Result<String, Box<dyn Error>> {
    let command = cli::Cli::command().get_name().to_owned();
    match env::var("CARGO_PKG_NAME") {
        Ok(package) if package != command => Err(format!(
            "command name '{command}' does not match package '{package}'"
        )
        .into()),
        _ => Ok(format!("{command}.1")),
    }
}
