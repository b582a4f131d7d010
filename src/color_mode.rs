//! Colour output detection.
//!
//! Decides whether Makefile text may be syntax highlighted. Colour is
//! disabled by the `--disable-coloring` flag, by the `NO_COLOR` environment
//! variable, or by `TERM=dumb`.

use std::env;

/// Whether printed Makefile text is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Text is printed verbatim.
    Plain,
    /// Text is passed through the syntax highlighter.
    Colored,
}

impl ColorMode {
    /// Return `true` when the mode is [`Colored`](ColorMode::Colored).
    #[must_use]
    pub const fn is_colored(self) -> bool {
        matches!(self, Self::Colored)
    }
}

/// Resolve the colour mode from the CLI flag and the process environment.
///
/// Precedence:
/// 1. `disabled == true`: [`Plain`](ColorMode::Plain).
/// 2. `NO_COLOR` set (any value, including empty): [`Plain`](ColorMode::Plain).
/// 3. `TERM=dumb`: [`Plain`](ColorMode::Plain).
/// 4. Default: [`Colored`](ColorMode::Colored).
#[must_use]
pub fn resolve(disabled: bool) -> ColorMode {
    resolve_with(disabled, |key| env::var(key).ok())
}

/// Testable variant that accepts an environment lookup function.
///
/// # Examples
///
/// ```
/// use makeshow::color_mode::{ColorMode, resolve_with};
///
/// let mode = resolve_with(false, |key| match key {
///     "NO_COLOR" => Some(String::from("1")),
///     _ => None,
/// });
/// assert_eq!(mode, ColorMode::Plain);
/// ```
#[must_use]
pub fn resolve_with<F>(disabled: bool, read_env: F) -> ColorMode
where
    F: Fn(&str) -> Option<String>,
{
    if disabled || read_env("NO_COLOR").is_some() {
        return ColorMode::Plain;
    }
    if read_env("TERM").as_deref() == Some("dumb") {
        return ColorMode::Plain;
    }
    ColorMode::Colored
}
