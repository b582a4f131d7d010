//! Target extraction.
//!
//! A single pass over the flattened lines recognises target declaration lines
//! and collects each target's recipe body and prerequisite tokens. A later
//! declaration of the same name replaces the earlier one while keeping the
//! name's first-appearance position.

use indexmap::IndexMap;
use tracing::debug;

/// A recognised target declaration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Name of the declared target.
    pub name: &'a str,
    /// Text following the declaration token, holding the prerequisites.
    pub tail: &'a str,
}

impl<'a> Declaration<'a> {
    /// Recognise `line` as a target declaration.
    ///
    /// Accepts `name: prereqs` and `name : prereqs`. Tokens beginning with `.`
    /// and lines beginning with whitespace never declare a target.
    ///
    /// # Examples
    ///
    /// ```
    /// use makeshow::parser::Declaration;
    ///
    /// let decl = Declaration::parse("app : main.o util.o").expect("target");
    /// assert_eq!(decl.name, "app");
    /// assert_eq!(decl.prerequisites(), vec!["main.o", "util.o"]);
    /// assert!(Declaration::parse(".PHONY: app").is_none());
    /// assert!(Declaration::parse("CC := gcc").is_none());
    /// ```
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        if line.starts_with(char::is_whitespace) {
            return None;
        }
        let first = line.split_whitespace().next()?;
        if first.starts_with('.') {
            return None;
        }
        let after_first = line.get(first.len()..)?;
        if let Some(name) = first.strip_suffix(':') {
            if name.is_empty() {
                return None;
            }
            return Some(Self {
                name,
                tail: after_first,
            });
        }
        let rest = after_first.trim_start();
        let tail = rest.strip_prefix(':')?;
        if tail.starts_with(|c: char| !c.is_whitespace()) {
            return None;
        }
        Some(Self { name: first, tail })
    }

    /// Prerequisite tokens in source order, duplicates preserved.
    ///
    /// Tokens are split on any whitespace, so tab-separated prerequisites are
    /// separate tokens; for space-only lines this matches splitting on single
    /// spaces and discarding empty tokens.
    #[must_use]
    pub fn prerequisites(&self) -> Vec<&'a str> {
        self.tail.split_whitespace().collect()
    }
}

/// Name of the target declared by `line`, if any.
#[must_use]
pub fn target_name(line: &str) -> Option<&str> {
    Declaration::parse(line).map(|decl| decl.name)
}

/// Everything extracted about one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    /// Declaration line plus its body lines, trailing blank lines removed.
    pub definition: String,
    /// Prerequisite tokens from the declaration line.
    pub prerequisites: Vec<String>,
}

/// Targets found in a flattened build file, keyed by name in first-appearance
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetTable {
    entries: IndexMap<String, TargetEntry>,
}

impl TargetTable {
    /// Scan `lines` once and collect every target declaration.
    ///
    /// # Examples
    ///
    /// ```
    /// use makeshow::parser::TargetTable;
    ///
    /// let lines = ["a: b", "\techo \"a\"", "b: a", "\techo \"b\""];
    /// let table = TargetTable::from_lines(&lines);
    /// assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
    /// assert_eq!(table.definition("a"), Some("a: b\n\techo \"a\""));
    /// ```
    #[must_use]
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut builder = TableBuilder::default();
        for line in lines {
            builder.push(line.as_ref());
        }
        let table = builder.finish();
        debug!(targets = table.len(), "extracted targets");
        table
    }

    /// Target names in first-appearance order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Look up everything recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TargetEntry> {
        self.entries.get(name)
    }

    /// Recipe body for `name`.
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&str> {
        self.get(name).map(|entry| entry.definition.as_str())
    }

    /// Number of distinct targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no target was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Map every target name to its recipe body.
    #[must_use]
    pub fn definitions(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.definition.clone()))
            .collect()
    }

    /// Build the [`DependencyMap`] restricted to `names`.
    ///
    /// Names without a declaration map to an empty prerequisite list.
    #[must_use]
    pub fn dependencies_for<S: AsRef<str>>(&self, names: &[S]) -> DependencyMap {
        names
            .iter()
            .map(|name| {
                let key = name.as_ref();
                let prerequisites = self
                    .get(key)
                    .map(|entry| entry.prerequisites.clone())
                    .unwrap_or_default();
                (key.to_owned(), prerequisites)
            })
            .collect()
    }
}

/// Accumulates the body of the target currently being read.
#[derive(Default)]
struct TableBuilder {
    entries: IndexMap<String, TargetEntry>,
    open: Option<OpenTarget>,
}

struct OpenTarget {
    name: String,
    prerequisites: Vec<String>,
    body: Vec<String>,
}

impl TableBuilder {
    fn push(&mut self, line: &str) {
        if let Some(open) = self.open.as_mut()
            && (line.is_empty() || line.starts_with([' ', '\t']))
        {
            open.body.push(line.to_owned());
            return;
        }
        self.close();
        if let Some(decl) = Declaration::parse(line) {
            self.open = Some(OpenTarget {
                name: decl.name.to_owned(),
                prerequisites: decl.prerequisites().into_iter().map(str::to_owned).collect(),
                body: vec![line.to_owned()],
            });
        }
    }

    fn close(&mut self) {
        let Some(mut open) = self.open.take() else {
            return;
        };
        while open.body.last().is_some_and(String::is_empty) {
            open.body.pop();
        }
        self.entries.insert(
            open.name,
            TargetEntry {
                definition: open.body.join("\n"),
                prerequisites: open.prerequisites,
            },
        );
    }

    fn finish(mut self) -> TargetTable {
        self.close();
        TargetTable {
            entries: self.entries,
        }
    }
}

/// Prerequisite tokens per target name.
///
/// Unknown names resolve to an empty list rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap(IndexMap<String, Vec<String>>);

impl DependencyMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the prerequisites of `target`, replacing any previous entry.
    pub fn insert<I, S>(&mut self, target: impl Into<String>, prerequisites: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(
            target.into(),
            prerequisites.into_iter().map(Into::into).collect(),
        );
    }

    /// Prerequisites of `target`; empty when the target is unknown.
    #[must_use]
    pub fn prerequisites(&self, target: &str) -> &[String] {
        self.0.get(target).map_or(&[], Vec::as_slice)
    }

    /// Whether `target` has an entry.
    #[must_use]
    pub fn contains(&self, target: &str) -> bool {
        self.0.contains_key(target)
    }

    /// Target names in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for DependencyMap {
    fn from_iter<T: IntoIterator<Item = (K, Vec<String>)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, prerequisites)| (name.into(), prerequisites))
                .collect(),
        )
    }
}

/// Ordered target names and the name-to-definition lookup for `lines`.
#[must_use]
pub fn extract_targets_and_definitions<S: AsRef<str>>(
    lines: &[S],
) -> (Vec<String>, IndexMap<String, String>) {
    let table = TargetTable::from_lines(lines);
    let names = table.names().map(str::to_owned).collect();
    (names, table.definitions())
}

/// Prerequisite lists for `targets` as declared in `lines`.
#[must_use]
pub fn compute_dependencies<S: AsRef<str>, T: AsRef<str>>(
    lines: &[S],
    targets: &[T],
) -> DependencyMap {
    TargetTable::from_lines(lines).dependencies_for(targets)
}
