//! Makefile syntax highlighting.
//!
//! Highlighting is line-syntactic like the parser: each line is classified as
//! a comment, directive, special target, target declaration, variable
//! assignment or plain text, and `$(...)` references are picked out inside it.
//! Removing the ANSI escapes from highlighted text always yields the input.

use console::{Color, Style};

use crate::parser::Declaration;

/// Formatting hook applied to Makefile text before it is printed.
///
/// Renderers take `Option<&dyn Colorizer>`; `None` prints text unchanged. Any
/// `Fn(&str) -> String` closure is a colorizer.
pub trait Colorizer {
    /// Return `text` decorated for display.
    fn colorize(&self, text: &str) -> String;
}

impl<F> Colorizer for F
where
    F: Fn(&str) -> String,
{
    fn colorize(&self, text: &str) -> String {
        self(text)
    }
}

const DIRECTIVES: &[&str] = &[
    "include", "-include", "sinclude", "ifeq", "ifneq", "ifdef", "ifndef", "else", "endif",
    "define", "endef", "export", "unexport", "override", "vpath",
];

/// Characters that name an automatic variable after `$`.
const AUTOMATIC_VARIABLES: &str = "@<^?*%+|";

/// Styles used for each kind of Makefile token.
#[derive(Debug, Clone)]
struct Palette {
    target: Style,
    prerequisite: Style,
    comment: Style,
    directive: Style,
    variable: Style,
    special: Style,
}

impl Palette {
    fn from_codes(
        target: u8,
        prerequisite: u8,
        comment: u8,
        directive: u8,
        variable: u8,
        special: u8,
    ) -> Self {
        let style = |code| Style::new().fg(Color::Color256(code)).force_styling(true);
        Self {
            target: style(target).bold(),
            prerequisite: style(prerequisite),
            comment: style(comment).italic(),
            directive: style(directive),
            variable: style(variable),
            special: style(special),
        }
    }
}

/// Syntax highlighter for Makefile text using a named colour scheme.
#[derive(Debug, Clone)]
pub struct Highlighter {
    palette: Palette,
}

impl Highlighter {
    /// Names accepted by [`Highlighter::for_scheme`].
    pub const SCHEMES: &'static [&'static str] =
        &["one-dark", "monokai", "solarized-dark", "solarized-light"];

    /// Default scheme name.
    pub const DEFAULT_SCHEME: &'static str = "one-dark";

    /// Build a highlighter for the scheme called `name`.
    ///
    /// Returns `None` for unknown scheme names.
    ///
    /// # Examples
    ///
    /// ```
    /// use makeshow::highlight::Highlighter;
    ///
    /// assert!(Highlighter::for_scheme("monokai").is_some());
    /// assert!(Highlighter::for_scheme("no-such-style").is_none());
    /// ```
    #[must_use]
    pub fn for_scheme(name: &str) -> Option<Self> {
        let palette = match name {
            "one-dark" => Palette::from_codes(39, 180, 59, 170, 38, 204),
            "monokai" => Palette::from_codes(148, 186, 242, 197, 81, 141),
            "solarized-dark" => Palette::from_codes(33, 136, 240, 64, 37, 166),
            "solarized-light" => Palette::from_codes(33, 136, 245, 64, 37, 166),
            _ => return None,
        };
        Some(Self { palette })
    }

    /// Highlight every line of `text`.
    #[must_use]
    pub fn highlight(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 2);
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                out.push('\n');
            }
            self.highlight_line(&mut out, line);
        }
        out
    }

    fn highlight_line(&self, out: &mut String, line: &str) {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        let (leading, body) = line.split_at(indent);

        if body.starts_with('#') {
            out.push_str(leading);
            push_styled(out, body, &self.palette.comment);
            return;
        }

        let first = body.split_whitespace().next().unwrap_or_default();
        if !line.starts_with('\t') && DIRECTIVES.contains(&first) {
            let (word, rest) = body.split_at(first.len());
            out.push_str(leading);
            push_styled(out, word, &self.palette.directive);
            self.push_with_variables(out, rest, None);
            return;
        }

        if indent == 0
            && first.starts_with('.')
            && let Some((name, rest)) = split_special_target(body)
        {
            push_styled(out, name, &self.palette.special);
            self.push_with_variables(out, rest, Some(&self.palette.prerequisite));
            return;
        }

        if let Some(decl) = Declaration::parse(line) {
            let (head, tail) = line.split_at(line.len() - decl.tail.len());
            let (name, separator) = head.split_at(decl.name.len());
            push_styled(out, name, &self.palette.target);
            out.push_str(separator);
            self.push_with_variables(out, tail, Some(&self.palette.prerequisite));
            return;
        }

        if indent == 0
            && let Some(name_len) = assignment_name_len(line)
        {
            let (name, rest) = line.split_at(name_len);
            self.push_with_variables(out, name, Some(&self.palette.variable));
            self.push_with_variables(out, rest, None);
            return;
        }

        self.push_with_variables(out, line, None);
    }

    /// Push `text`, styling variable references and everything else with
    /// `base` when given.
    fn push_with_variables(&self, out: &mut String, text: &str, base: Option<&Style>) {
        let mut rest = text;
        while let Some(start) = rest.find('$') {
            let (before, from_dollar) = rest.split_at(start);
            push_optional(out, before, base);
            let (len, is_variable) = reference_len(from_dollar);
            let (reference, after) = from_dollar.split_at(len);
            if is_variable {
                push_styled(out, reference, &self.palette.variable);
            } else {
                push_optional(out, reference, base);
            }
            rest = after;
        }
        push_optional(out, rest, base);
    }
}

impl Colorizer for Highlighter {
    fn colorize(&self, text: &str) -> String {
        self.highlight(text)
    }
}

fn push_styled(out: &mut String, text: &str, style: &Style) {
    if !text.is_empty() {
        out.push_str(&style.apply_to(text).to_string());
    }
}

fn push_optional(out: &mut String, text: &str, style: Option<&Style>) {
    match style {
        Some(active) => push_styled(out, text, active),
        None => out.push_str(text),
    }
}

/// Split `.PHONY: all clean` into the special target token and the rest.
fn split_special_target(body: &str) -> Option<(&str, &str)> {
    let first = body.split_whitespace().next()?;
    let colon = first.find(':')?;
    Some(body.split_at(colon + 1))
}

/// Length of the variable name of an assignment such as `CC := gcc`.
fn assignment_name_len(line: &str) -> Option<usize> {
    let eq = line.find('=')?;
    let (before, _) = line.split_at(eq);
    let name = before.trim_end_matches([':', '?', '+', '!']).trim_end();
    let valid = !name.is_empty() && !name.contains(char::is_whitespace) && !name.contains(':');
    valid.then_some(name.len())
}

/// Length of the `$` reference at the start of `text` and whether it names a
/// variable. `$$` is an escaped dollar sign.
fn reference_len(text: &str) -> (usize, bool) {
    let mut chars = text.char_indices().skip(1);
    let Some((_, opener)) = chars.next() else {
        return (text.len(), false);
    };
    let closer = match opener {
        '(' => ')',
        '{' => '}',
        '$' => return (2, false),
        c if AUTOMATIC_VARIABLES.contains(c) || c.is_ascii_alphanumeric() => {
            return (1 + c.len_utf8(), true);
        }
        _ => return (1, false),
    };
    let mut depth = 1_usize;
    for (index, c) in chars {
        if c == opener {
            depth += 1;
        } else if c == closer {
            depth -= 1;
            if depth == 0 {
                return (index + c.len_utf8(), true);
            }
        }
    }
    (text.len(), true)
}
