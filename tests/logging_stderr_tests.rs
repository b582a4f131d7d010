//! Verify that diagnostic logs go to stderr and leave stdout untouched.

use anyhow::Result;
use predicates::prelude::*;
use test_support::{MakefileDir, makeshow_cmd};

#[test]
fn verbose_logs_are_written_to_stderr() -> Result<()> {
    let dir = MakefileDir::with_makefile("a:\n\techo a\n")?;
    makeshow_cmd()?
        .current_dir(dir.root())
        .args(["-v", "a"])
        .assert()
        .success()
        .stdout("\na:\n\techo a\n\n")
        .stderr(predicate::str::contains("parsed Makefile"));
    Ok(())
}

#[test]
fn quiet_runs_log_nothing() -> Result<()> {
    let dir = MakefileDir::with_makefile("a:\n\techo a\n")?;
    makeshow_cmd()?
        .current_dir(dir.root())
        .arg("a")
        .assert()
        .success()
        .stderr("");
    Ok(())
}
