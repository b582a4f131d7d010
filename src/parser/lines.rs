//! Logical line loading.
//!
//! Reads a build file in one blocking call and joins backslash
//! continuations into single logical lines.

use camino::Utf8Path;
use std::fs;
use tracing::debug;

use super::LoadError;

/// A backslash continuation inside a recipe: the next physical line starts
/// with the recipe tab, which is dropped together with the line break.
const RECIPE_CONTINUATION: &str = "\\\n\t";
/// Any other backslash continuation joins the lines with a single space.
const LIST_CONTINUATION: &str = "\\\n";

/// Join backslash continuations and split `text` into logical lines.
///
/// Line terminators are not kept. Escaped backslashes are not recognised, so
/// a line ending in `\\` is still treated as continued.
///
/// # Examples
///
/// ```
/// use makeshow::parser::logical_lines;
///
/// let lines = logical_lines("a: b \\\n   c\n\techo x\\\n\ty\n");
/// assert_eq!(lines, vec!["a: b     c", "\techo xy"]);
/// ```
#[must_use]
pub fn logical_lines(text: &str) -> Vec<String> {
    text.replace(RECIPE_CONTINUATION, "")
        .replace(LIST_CONTINUATION, " ")
        .lines()
        .map(str::to_owned)
        .collect()
}

/// Read the file at `path` and return its logical lines.
///
/// # Errors
///
/// Returns [`LoadError::FileNotFound`] when `path` is not a regular file and
/// [`LoadError::Read`] when its contents cannot be read as UTF-8.
pub fn read_logical_lines(path: &Utf8Path) -> Result<Vec<String>, LoadError> {
    read_with(path, |missing| LoadError::FileNotFound {
        path: missing.to_owned(),
    })
}

/// Shared reader that lets callers choose the error reported for a missing
/// file.
pub(super) fn read_with(
    path: &Utf8Path,
    not_found: impl FnOnce(&Utf8Path) -> LoadError,
) -> Result<Vec<String>, LoadError> {
    if !path.is_file() {
        return Err(not_found(path));
    }
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    let lines = logical_lines(&text);
    debug!(path = %path, lines = lines.len(), "loaded build file");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    #[case("", &[])]
    #[case("a: b\n\techo a\n", &["a: b", "\techo a"])]
    #[case("no trailing newline", &["no trailing newline"])]
    #[case("\techo one \\\n\ttwo\n", &["\techo one two"])]
    #[case("SRCS = a.c \\\n  b.c\n", &["SRCS = a.c    b.c"])]
    #[case("all: x \\\ny \\\nz\n", &["all: x  y  z"])]
    #[case("a:\n\n\n", &["a:", "", ""])]
    fn joins_continuations(#[case] text: &str, #[case] expected: &[&str]) {
        assert_eq!(logical_lines(text), expected);
    }

    #[test]
    fn recipe_rule_applies_before_list_rule() {
        // A tab after the break selects the recipe rule, so no space appears.
        assert_eq!(logical_lines("x\\\n\ty"), vec!["xy"]);
        assert_eq!(logical_lines("x\\\n y"), vec!["x  y"]);
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("Makefile")).expect("utf8 path");
        std::fs::write(&path, "a: b \\\n\tc\n\techo hi\n").expect("write makefile");
        let lines = read_logical_lines(&path).expect("read lines");
        assert_eq!(lines, vec!["a: b c", "\techo hi"]);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent")).expect("utf8 path");
        let err = read_logical_lines(&path).expect_err("missing file");
        assert!(matches!(err, LoadError::FileNotFound { .. }), "{err:?}");
        assert!(err.is_not_found());
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 path");
        let err = read_logical_lines(&path).expect_err("directory");
        assert!(matches!(err, LoadError::FileNotFound { .. }), "{err:?}");
    }
}
