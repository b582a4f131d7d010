//! Terminal output for `makeshow`.
//!
//! Every function writes to a caller-supplied [`Write`] so that the runner can
//! target stdout while tests capture into a buffer. Makefile text passes
//! through an optional [`Colorizer`].

use std::io::{self, Write};
use std::path::Path;

use itertools::Itertools;

use crate::highlight::Colorizer;

/// ASCII art banner, starting and ending with an empty line.
pub const BANNER: &str = concat!(
    "\n",
    r"  __  __        _             _                 ", "\n",
    r" |  \/  | __ _ | |__ ___  ___| |_   ___ __ __ __", "\n",
    r" | |\/| |/ _` || / // -_)(_-<| ' \ / _ \\ V  V /", "\n",
    r" |_|  |_|\__,_||_\_\\___|/__/|_||_|\___/ \_/\_/ ", "\n",
);

fn colorize(text: &str, colorizer: Option<&dyn Colorizer>) -> String {
    colorizer.map_or_else(|| text.to_owned(), |c| c.colorize(text))
}

/// Write the banner.
///
/// # Errors
///
/// Propagates failures from `out`.
pub fn write_banner(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{BANNER}")
}

/// Write `items` as a bullet list, one `- item` per line.
///
/// # Errors
///
/// Propagates failures from `out`.
pub fn write_list<S: AsRef<str>>(out: &mut dyn Write, items: &[S]) -> io::Result<()> {
    let body = items.iter().map(|item| format!("- {}", item.as_ref())).join("\n");
    writeln!(out, "{body}")
}

/// Write usage instructions, the build file path and the targets it declares.
///
/// # Errors
///
/// Propagates failures from `out`.
pub fn write_usage<S: AsRef<str>>(
    out: &mut dyn Write,
    makefile_path: Option<&Path>,
    targets: Option<&[S]>,
    colorizer: Option<&dyn Colorizer>,
) -> io::Result<()> {
    writeln!(out, "Usage: makeshow <target_name> [<target_name> ...]")?;
    writeln!(out)?;
    writeln!(out, "This will print the definition of the provided Makefile targets.")?;
    writeln!(out)?;
    writeln!(out, "Highlighted options:")?;
    writeln!(
        out,
        "* Add -d to also print the definitions of the targets that the provided targets depend on."
    )?;
    writeln!(
        out,
        "* Use -s to print the entire Makefile (including includes) instead of specific targets."
    )?;
    if colorizer.is_some() {
        writeln!(
            out,
            "* Makefile targets are shown in color. Use -n to disable coloring."
        )?;
    } else {
        writeln!(
            out,
            "* Coloring is disabled. Drop -n and unset NO_COLOR to show Makefile contents in color."
        )?;
    }
    writeln!(out)?;
    if let Some(path) = makefile_path {
        writeln!(out, "Makefile:")?;
        writeln!(out, "  {}", path.display())?;
        writeln!(out)?;
    }
    if let Some(names) = targets {
        writeln!(out, "Targets found in Makefile:")?;
        write_list(out, names)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Write the whole flattened build file surrounded by single blank lines.
///
/// # Errors
///
/// Propagates failures from `out`.
pub fn write_entire_makefile<S: AsRef<str>>(
    out: &mut dyn Write,
    lines: &[S],
    colorizer: Option<&dyn Colorizer>,
) -> io::Result<()> {
    let joined = lines.iter().map(AsRef::as_ref).join("\n");
    let contents = joined.trim_matches('\n');
    writeln!(out)?;
    writeln!(out, "{}", colorize(contents, colorizer))?;
    writeln!(out)
}

/// Placeholder printed for a target without a definition.
#[must_use]
pub fn missing_definition(target: &str) -> String {
    format!("(No definition found for target '{target}')")
}

/// Write one target definition.
///
/// # Errors
///
/// Propagates failures from `out`.
pub fn write_target_definition(
    out: &mut dyn Write,
    definition: &str,
    colorizer: Option<&dyn Colorizer>,
) -> io::Result<()> {
    writeln!(out, "{}", colorize(definition, colorizer))
}

/// Write the definitions of `targets` in order, each followed by `sep`.
///
/// `lookup` returns the recipe body for a name; unknown names print
/// [`missing_definition`].
///
/// # Errors
///
/// Propagates failures from `out`.
pub fn write_target_definitions<'a, F, S>(
    out: &mut dyn Write,
    lookup: F,
    targets: &[S],
    sep: &str,
    colorizer: Option<&dyn Colorizer>,
) -> io::Result<()>
where
    F: Fn(&str) -> Option<&'a str>,
    S: AsRef<str>,
{
    writeln!(out, "{sep}")?;
    for target in targets.iter().map(AsRef::as_ref) {
        let definition = lookup(target).map_or_else(|| missing_definition(target), str::to_owned);
        write_target_definition(out, &definition, colorizer)?;
        writeln!(out, "{sep}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn capture(write: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer).expect("write to buffer");
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[test]
    fn list_uses_dash_bullets() {
        let output = capture(|out| write_list(out, &["a", "b", "c"]));
        assert_eq!(output.split('\n').collect::<Vec<_>>(), vec!["- a", "- b", "- c", ""]);
    }

    #[test]
    fn banner_is_framed_by_blank_lines() {
        let output = capture(write_banner);
        assert!(output.starts_with('\n'));
        assert!(output.ends_with("\n\n"));
        assert_eq!(output.lines().filter(|line| !line.is_empty()).count(), 4);
    }

    #[rstest]
    #[case(true, "Use -n to disable coloring.")]
    #[case(false, "Coloring is disabled.")]
    fn usage_mentions_coloring_state(#[case] colored: bool, #[case] expected: &str) {
        let identity = |text: &str| text.to_owned();
        let colorizer: Option<&dyn Colorizer> = colored.then_some(&identity as &dyn Colorizer);
        let output = capture(|out| {
            write_usage(
                out,
                Some(Path::new("/tmp/Makefile")),
                Some(["a", "b"].as_slice()),
                colorizer,
            )
        });
        assert!(output.contains(expected), "{output}");
        assert!(output.contains("Makefile:\n  /tmp/Makefile\n"), "{output}");
        assert!(output.contains("Targets found in Makefile:\n- a\n- b\n"), "{output}");
    }

    #[test]
    fn usage_without_path_or_targets_skips_sections() {
        let output = capture(|out| write_usage::<&str>(out, None, None, None));
        assert!(output.starts_with("Usage: makeshow"));
        assert!(!output.contains("Targets found"));
        assert!(!output.contains("Makefile:\n"));
    }

    #[test]
    fn entire_makefile_is_trimmed_and_framed() {
        let lines = ["", "a: b", "\techo a", "", ""];
        let output = capture(|out| write_entire_makefile(out, &lines, None));
        assert_eq!(output, "\na: b\n\techo a\n\n");
    }

    #[test]
    fn entire_makefile_uses_colorizer() {
        let upper = |text: &str| text.to_uppercase();
        let output = capture(|out| write_entire_makefile(out, &["a: b"], Some(&upper)));
        assert_eq!(output, "\nA: B\n\n");
    }

    #[test]
    fn definitions_are_separated_and_missing_ones_noted() {
        let lookup = |name: &str| (name == "a").then_some("a: b\n\techo \"a\"");
        let output = capture(|out| write_target_definitions(out, lookup, &["a", "zzz"], "", None));
        assert_eq!(
            output,
            "\na: b\n\techo \"a\"\n\n(No definition found for target 'zzz')\n\n"
        );
    }

    #[test]
    fn definitions_pass_through_colorizer() {
        let upper = |text: &str| text.to_uppercase();
        let output = capture(|out| write_target_definition(out, "a: b\n\techo a", Some(&upper)));
        assert_eq!(output, "A: B\n\tECHO A\n");
    }
}
