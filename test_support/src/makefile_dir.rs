//! Temporary directories holding Makefile fixtures.
//!
//! # Examples
//!
//! ```rust,ignore
//! use test_support::MakefileDir;
//!
//! let dir = MakefileDir::with_makefile("all:\n\techo hi\n")?;
//! dir.write("rules.mk", "r:\n")?;
//! assert!(dir.makefile().is_file());
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Name of the root build file created by [`MakefileDir::with_makefile`].
pub const MAKEFILE: &str = "Makefile";

/// A temporary directory removed on drop.
#[derive(Debug)]
pub struct MakefileDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl MakefileDir {
    /// Create an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create temp dir")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temp dir path is not UTF-8: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Create a directory containing a `Makefile` with `contents`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or file cannot be created.
    pub fn with_makefile(contents: &str) -> Result<Self> {
        let dir = Self::new()?;
        dir.write(MAKEFILE, contents)?;
        Ok(dir)
    }

    /// Write `contents` to `name` relative to the root, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Copy the fixture at `source` into the directory as `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the fixture cannot be read or written.
    pub fn copy_from(&self, source: impl AsRef<Utf8Path>, name: &str) -> Result<Utf8PathBuf> {
        let from = source.as_ref();
        let text = fs::read_to_string(from).with_context(|| format!("read {from}"))?;
        self.write(name, &text)
    }

    /// Root of the directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of the root `Makefile`.
    #[must_use]
    pub fn makefile(&self) -> Utf8PathBuf {
        self.root.join(MAKEFILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::ensure;
    use rstest::rstest;

    #[rstest]
    fn writes_nested_files() -> Result<()> {
        let dir = MakefileDir::with_makefile("all:\n")?;
        let nested = dir.write("mk/rules.mk", "r:\n")?;
        ensure!(nested.is_file(), "nested fixture should exist");
        ensure!(dir.makefile().is_file(), "Makefile should exist");
        Ok(())
    }
}
