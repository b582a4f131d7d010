//! End-to-end tests for the `makeshow` binary.

use anyhow::{Context, Result, ensure};
use camino::Utf8PathBuf;
use predicates::prelude::*;
use test_support::{MakefileDir, makeshow_cmd};

fn fixture(path: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(path)
}

fn including_dir() -> Result<MakefileDir> {
    let dir = MakefileDir::new()?;
    for name in ["Makefile", "extra_bc.mk", "extra_de.mk"] {
        dir.copy_from(fixture(&format!("including/{name}")), name)?;
    }
    Ok(dir)
}

#[test]
fn circular_dependencies_are_reported_and_dropped() -> Result<()> {
    let dir = MakefileDir::new()?;
    dir.copy_from(fixture("circular/Makefile"), "Makefile")?;
    makeshow_cmd()?
        .current_dir(dir.root())
        .args(["-d", "a"])
        .assert()
        .success()
        .stdout("\nb: a\n\techo \"b\"\n\na: b\n\techo \"a\"\n\n")
        .stderr(predicate::str::contains(
            "makeshow: Circular dependency dropped: b <- a (meaning 'b' requires 'a')",
        ));
    Ok(())
}

#[test]
fn missing_makefile_exits_with_not_found_code() -> Result<()> {
    let dir = MakefileDir::new()?;
    makeshow_cmd()?
        .current_dir(dir.root())
        .assert()
        .code(17)
        .stdout(predicate::str::contains("Usage").not())
        .stderr(
            predicate::str::starts_with("ERROR: Makefile not found:")
                .and(predicate::str::contains("--makefile-path")),
        );
    Ok(())
}

#[test]
fn missing_include_exits_with_not_found_code() -> Result<()> {
    let dir = MakefileDir::with_makefile("include nowhere.mk\n\na:\n\techo a\n")?;
    makeshow_cmd()?
        .current_dir(dir.root())
        .arg("a")
        .assert()
        .code(17)
        .stderr(predicate::str::contains("nowhere.mk"));
    Ok(())
}

#[test]
fn usage_lists_targets_from_includes() -> Result<()> {
    let dir = including_dir()?;
    let output = makeshow_cmd()?
        .current_dir(dir.root())
        .output()
        .context("run makeshow")?;
    ensure!(output.status.success(), "usage run failed: {output:?}");
    let stdout = String::from_utf8(output.stdout).context("utf8 stdout")?;
    ensure!(stdout.contains("Usage: makeshow"), "no usage in {stdout}");
    ensure!(
        stdout.contains("Targets found in Makefile:\n- a\n- b\n- c\n- d\n- e\n- all\n"),
        "unexpected target list in {stdout}"
    );
    Ok(())
}

#[test]
fn makefile_path_flag_selects_another_file() -> Result<()> {
    let dir = MakefileDir::new()?;
    let path = dir.copy_from(fixture("circular/Makefile"), "build/rules.mk")?;
    makeshow_cmd()?
        .args(["-m", path.as_str(), "b"])
        .assert()
        .success()
        .stdout("\nb: a\n\techo \"b\"\n\n");
    Ok(())
}

#[test]
fn unknown_targets_print_placeholder() -> Result<()> {
    let dir = MakefileDir::new()?;
    dir.copy_from(fixture("circular/Makefile"), "Makefile")?;
    makeshow_cmd()?
        .current_dir(dir.root())
        .args(["ghost", "a"])
        .assert()
        .success()
        .stdout("\n(No definition found for target 'ghost')\n\na: b\n\techo \"a\"\n\n");
    Ok(())
}

#[test]
fn dependency_chain_spans_included_files() -> Result<()> {
    let dir = including_dir()?;
    let output = makeshow_cmd()?
        .current_dir(dir.root())
        .args(["-d", "e"])
        .output()
        .context("run makeshow")?;
    ensure!(output.status.success(), "chain run failed: {output:?}");
    ensure!(output.stderr.is_empty(), "unexpected stderr: {output:?}");
    let stdout = String::from_utf8(output.stdout).context("utf8 stdout")?;
    let positions: Vec<Option<usize>> = ["a:\n", "b: a\n", "c: b\n", "d: c\n", "e: d\n"]
        .iter()
        .map(|decl| stdout.find(decl))
        .collect();
    ensure!(
        positions.iter().all(Option::is_some) && positions.is_sorted(),
        "definitions out of order: {stdout}"
    );
    Ok(())
}

#[test]
fn show_makefile_prints_flattened_contents() -> Result<()> {
    let dir = including_dir()?;
    makeshow_cmd()?
        .current_dir(dir.root())
        .arg("-s")
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("\n# ")
                .and(predicate::str::contains("# Extra Makefile targets: d and e"))
                .and(predicate::str::contains("include extra").not())
                .and(predicate::str::ends_with("\t@echo \"done\"\n\n")),
        );
    Ok(())
}

#[test]
fn coloured_output_strips_back_to_plain_text() -> Result<()> {
    let dir = MakefileDir::new()?;
    dir.copy_from(fixture("circular/Makefile"), "Makefile")?;
    let output = makeshow_cmd()?
        .current_dir(dir.root())
        .env_remove("NO_COLOR")
        .env("TERM", "xterm-256color")
        .arg("a")
        .output()
        .context("run makeshow")?;
    ensure!(output.status.success(), "coloured run failed: {output:?}");
    let stdout = String::from_utf8(output.stdout).context("utf8 stdout")?;
    let plain = console::strip_ansi_codes(&stdout);
    ensure!(stdout.contains('\u{1b}'), "expected ANSI escapes in {stdout:?}");
    ensure!(
        plain == "\na: b\n\techo \"a\"\n\n",
        "stripped output differs: {plain:?}"
    );
    Ok(())
}

#[test]
fn unknown_color_scheme_warns_and_disables_colour() -> Result<()> {
    let dir = MakefileDir::new()?;
    dir.copy_from(fixture("circular/Makefile"), "Makefile")?;
    let output = makeshow_cmd()?
        .current_dir(dir.root())
        .env_remove("NO_COLOR")
        .env("TERM", "xterm-256color")
        .args(["-c", "no-such-scheme", "a"])
        .output()
        .context("run makeshow")?;
    ensure!(output.status.success(), "run failed: {output:?}");
    let stderr = String::from_utf8(output.stderr).context("utf8 stderr")?;
    ensure!(
        stderr.contains("WARNING: Style 'no-such-scheme' not found. Coloring disabled."),
        "missing warning in {stderr}"
    );
    ensure!(
        !output.stdout.contains(&0x1b),
        "colour should be disabled after the warning"
    );
    Ok(())
}

#[test]
fn disable_flag_wins_over_scheme() -> Result<()> {
    let dir = MakefileDir::new()?;
    dir.copy_from(fixture("circular/Makefile"), "Makefile")?;
    makeshow_cmd()?
        .current_dir(dir.root())
        .env_remove("NO_COLOR")
        .env("TERM", "xterm-256color")
        .args(["-n", "-c", "monokai", "a"])
        .assert()
        .success()
        .stdout("\na: b\n\techo \"a\"\n\n")
        .stderr("");
    Ok(())
}
