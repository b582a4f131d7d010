//! Error types raised while loading build files.
//!
//! Kept in its own submodule so the derive-affected code can carry a narrow
//! lint suppression, mirroring the runner errors.

// The unused_assignments lint fires in some Rust versions for fields read only
// by the miette/thiserror derive expansion. `#[expect]` cannot be used because
// the lint is version dependent.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Failures encountered while reading a build file or one of its includes.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    /// The root build file does not name a readable file.
    #[error("Makefile not found: '{path}'")]
    #[diagnostic(
        code(makeshow::parser::file_not_found),
        help("pass the path to an existing Makefile")
    )]
    FileNotFound {
        /// Path that was attempted.
        path: Utf8PathBuf,
    },

    /// A file named by an `include` directive does not exist.
    #[error("Include file not found: '{path}'")]
    #[diagnostic(
        code(makeshow::parser::include_not_found),
        help("include paths are resolved relative to the directory of the root Makefile")
    )]
    IncludeNotFound {
        /// Resolved path of the included file.
        path: Utf8PathBuf,
    },

    /// The file exists but could not be read as UTF-8 text.
    #[error("failed to read '{path}'")]
    #[diagnostic(code(makeshow::parser::read))]
    Read {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Return `true` for the missing-file variants.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::IncludeNotFound { .. })
    }
}
