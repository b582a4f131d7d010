//! Include flattening.
//!
//! Splices the files named by the root file's `include` directives into one
//! logical line sequence. Included files are loaded but their own directives
//! are left untouched.

use camino::Utf8Path;
use tracing::debug;

use super::LoadError;
use super::lines::{read_logical_lines, read_with};

const INCLUDE_DIRECTIVE: &str = "include ";
/// Longest run of consecutive blank lines kept in the flattened output.
const MAX_BLANK_RUN: usize = 2;

/// Load the build file at `path` and splice in the files it includes.
///
/// # Errors
///
/// Returns [`LoadError::FileNotFound`] when `path` is missing and
/// [`LoadError::IncludeNotFound`] when an included file is missing.
pub fn load_and_flatten(path: &Utf8Path) -> Result<Vec<String>, LoadError> {
    let lines = read_logical_lines(path)?;
    let base = path.parent().unwrap_or_else(|| Utf8Path::new(""));
    flatten_includes(&lines, base)
}

/// Replace each `include` directive in `lines` with the logical lines of the
/// files it names, resolved relative to `base`.
///
/// A directive without any file name is kept as ordinary text.
///
/// Every included block is wrapped in one blank line on each side. The result
/// has runs of three or more blank lines collapsed to two and ends with
/// exactly one blank line.
///
/// # Errors
///
/// Returns [`LoadError::IncludeNotFound`] when an included file is missing.
pub fn flatten_includes(lines: &[String], base: &Utf8Path) -> Result<Vec<String>, LoadError> {
    let mut flattened = Vec::with_capacity(lines.len());
    for line in lines {
        let arguments: Vec<&str> = line
            .strip_prefix(INCLUDE_DIRECTIVE)
            .map(|rest| rest.split_whitespace().collect())
            .unwrap_or_default();
        if arguments.is_empty() {
            flattened.push(line.clone());
            continue;
        }
        for argument in arguments {
            let included = base.join(argument);
            let block = read_with(&included, |missing| LoadError::IncludeNotFound {
                path: missing.to_owned(),
            })?;
            debug!(include = %included, lines = block.len(), "splicing included file");
            flattened.push(String::new());
            flattened.extend(block);
            flattened.push(String::new());
        }
    }
    Ok(normalize_blank_lines(flattened))
}

/// Collapse long blank runs and leave exactly one trailing blank line.
fn normalize_blank_lines(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + 1);
    let mut run = 0;
    for line in lines {
        if line.is_empty() {
            run += 1;
            if run > MAX_BLANK_RUN {
                continue;
            }
        } else {
            run = 0;
        }
        out.push(line);
    }
    if out.is_empty() {
        return out;
    }
    while out.last().is_some_and(String::is_empty) {
        out.pop();
    }
    out.push(String::new());
    out
}
