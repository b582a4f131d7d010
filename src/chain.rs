//! Dependency chain resolution.
//!
//! Orders a set of requested targets and everything they transitively
//! require so that every prerequisite precedes its dependent. Edges that
//! lead back to a target still being resolved on the current branch are
//! dropped and reported as [`DroppedEdge`]s, so resolution always terminates.

// See `parser::error` for why this suppression is needed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use std::fmt;

use indexmap::IndexSet;
use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

use crate::parser::DependencyMap;

/// Name of the transient target whose prerequisites are the requested targets.
pub const SENTINEL_TARGET: &str = "____DUMMY____";

/// Errors raised while resolving a dependency chain.
#[derive(Debug, Error, Diagnostic)]
pub enum ChainError {
    /// The build file declares a target with the sentinel's name.
    #[error("Dummy target '{name}' found in Makefile")]
    #[diagnostic(
        code(makeshow::chain::sentinel_collision),
        help("rename the target; this name is reserved for resolving several targets at once")
    )]
    SentinelCollision {
        /// The colliding name.
        name: String,
    },
}

/// A prerequisite edge discarded because it closes a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedEdge {
    /// Target whose declaration lists `prerequisite`.
    pub target: String,
    /// Prerequisite that is already being resolved on the current branch.
    pub prerequisite: String,
}

impl fmt::Display for DroppedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "makeshow: Circular dependency dropped: {target} <- {prereq} (meaning '{target}' requires '{prereq}')",
            target = self.target,
            prereq = self.prerequisite,
        )
    }
}

/// Outcome of resolving a dependency chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyChain {
    order: Vec<String>,
    dropped: Vec<DroppedEdge>,
}

impl DependencyChain {
    /// Target names, prerequisites first, each name once.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Cyclic edges dropped during resolution, in detection order.
    #[must_use]
    pub fn dropped_edges(&self) -> &[DroppedEdge] {
        &self.dropped
    }

    /// Consume the chain, returning the ordered names.
    #[must_use]
    pub fn into_names(self) -> Vec<String> {
        self.order
    }
}

/// Resolve `requested` and their prerequisites into one dependency-first
/// ordering.
///
/// The requested targets act as the prerequisites of a transient
/// [`SENTINEL_TARGET`], which is removed from the result.
///
/// # Errors
///
/// Returns [`ChainError::SentinelCollision`] when `dependencies` already
/// holds a target named [`SENTINEL_TARGET`].
///
/// # Examples
///
/// ```
/// use makeshow::chain::resolve_chain;
/// use makeshow::parser::DependencyMap;
///
/// let mut deps = DependencyMap::new();
/// deps.insert("app", ["main.o", "util.o"]);
/// deps.insert("main.o", ["config.h"]);
/// deps.insert("util.o", ["config.h"]);
/// let chain = resolve_chain(&["app"], &deps).expect("resolve");
/// assert_eq!(chain.names(), ["config.h", "main.o", "util.o", "app"]);
/// ```
pub fn resolve_chain<S: AsRef<str>>(
    requested: &[S],
    dependencies: &DependencyMap,
) -> Result<DependencyChain, ChainError> {
    if dependencies.contains(SENTINEL_TARGET) {
        return Err(ChainError::SentinelCollision {
            name: SENTINEL_TARGET.to_owned(),
        });
    }
    let requested_names: Vec<String> = requested
        .iter()
        .map(|name| name.as_ref().to_owned())
        .collect();
    let mut resolver = ChainResolver::new(dependencies, &requested_names);
    let mut order = resolver.resolve(SENTINEL_TARGET);
    let sentinel = order.pop();
    debug_assert_eq!(sentinel.as_deref(), Some(SENTINEL_TARGET));
    debug!(chain = ?order, dropped = resolver.dropped.len(), "resolved dependency chain");
    Ok(DependencyChain {
        order: order.into_iter().collect(),
        dropped: resolver.dropped,
    })
}

/// Resolve a single `target` against `dependencies`.
///
/// The result ends with `target` itself.
#[must_use]
pub fn resolve_target(target: &str, dependencies: &DependencyMap) -> DependencyChain {
    let mut resolver = ChainResolver::new(dependencies, &[]);
    let order = resolver.resolve(target);
    DependencyChain {
        order: order.into_iter().collect(),
        dropped: resolver.dropped,
    }
}

/// Depth-first resolver tracking the ancestors of the current branch.
struct ChainResolver<'a> {
    dependencies: &'a DependencyMap,
    requested: &'a [String],
    ancestors: IndexSet<String>,
    dropped: Vec<DroppedEdge>,
}

impl<'a> ChainResolver<'a> {
    fn new(dependencies: &'a DependencyMap, requested: &'a [String]) -> Self {
        Self {
            dependencies,
            requested,
            ancestors: IndexSet::new(),
            dropped: Vec::new(),
        }
    }

    fn prerequisites(&self, target: &str) -> &'a [String] {
        if target == SENTINEL_TARGET && !self.dependencies.contains(SENTINEL_TARGET) {
            self.requested
        } else {
            self.dependencies.prerequisites(target)
        }
    }

    fn resolve(&mut self, target: &str) -> IndexSet<String> {
        let mut chain = IndexSet::new();
        self.ancestors.insert(target.to_owned());
        for prerequisite in self.prerequisites(target) {
            if self.ancestors.contains(prerequisite) {
                debug!(%target, %prerequisite, "dropping cyclic dependency edge");
                self.dropped.push(DroppedEdge {
                    target: target.to_owned(),
                    prerequisite: prerequisite.clone(),
                });
                continue;
            }
            for name in self.resolve(prerequisite) {
                chain.insert(name);
            }
        }
        self.ancestors.pop();
        chain.insert(target.to_owned());
        chain
    }
}
