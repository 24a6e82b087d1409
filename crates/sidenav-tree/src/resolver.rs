//! Tree resolver.
//!
//! Validates declarative trees against a [`CatalogIndex`] and produces
//! [`ResolvedTree`]s. Resolution is all-or-nothing: either every node
//! resolves, or the caller gets the complete list of problems and no tree.
//!
//! # Example
//!
//! ```
//! use sidenav_catalog::{CatalogIndex, DocumentMetadata};
//! use sidenav_tree::{NavNode, NavTree, Resolver};
//!
//! let catalog = CatalogIndex::from_documents([
//!     DocumentMetadata::from_id("install", "Installation"),
//!     DocumentMetadata::from_id("quick-start", "Quick Start"),
//! ]);
//! let tree = NavTree::new(vec![NavNode::category(
//!     "Getting Started",
//!     vec![NavNode::doc("install"), NavNode::doc("quick-start")],
//! )]);
//!
//! let resolved = Resolver::default().resolve("docs", &tree, &catalog).unwrap();
//! assert_eq!(resolved.documents().len(), 2);
//! ```

use std::collections::HashSet;

use rayon::prelude::*;
use sidenav_catalog::{Availability, CatalogIndex};

use crate::error::{Location, ResolveError, SidebarErrors, SidebarsError, ValidationError};
use crate::model::{Category, DocRef, NavNode, NavTree, Sidebars};
use crate::resolved::{
    ResolvedCategory, ResolvedDoc, ResolvedNode, ResolvedSidebars, ResolvedTree,
};

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Resolver settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Deepest allowed node level. Top-level entries are at depth 1; each
    /// enclosing category adds one.
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Stateless tree resolver.
///
/// Calls are independent: the same inputs always produce the same output,
/// and concurrent calls share nothing but the read-only catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Create a resolver with the given settings.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolver settings.
    #[must_use]
    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    /// Validate one tree and attach catalog metadata to every document.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::CatalogUnavailable`] without walking the tree
    /// if the catalog source could not be enumerated, or
    /// [`ResolveError::Invalid`] with every validation error found.
    pub fn resolve(
        &self,
        name: &str,
        tree: &NavTree,
        catalog: &CatalogIndex,
    ) -> Result<ResolvedTree, ResolveError> {
        if let Availability::Unavailable { reason } = catalog.availability() {
            return Err(ResolveError::CatalogUnavailable(reason.clone()));
        }

        let mut walk = Walk::new(catalog, self.config.max_depth);
        let items = walk.resolve_items(&tree.items, 1);

        if walk.errors.is_empty() {
            tracing::debug!(
                sidebar = name,
                documents = walk.seen.len(),
                "Sidebar resolved"
            );
            Ok(ResolvedTree {
                name: name.to_owned(),
                items,
            })
        } else {
            tracing::debug!(
                sidebar = name,
                errors = walk.errors.len(),
                "Sidebar failed validation"
            );
            Err(ResolveError::Invalid(walk.errors))
        }
    }

    /// Resolve every sidebar in parallel against a shared catalog.
    ///
    /// Results keep declaration order. Ids may repeat across different
    /// sidebars; uniqueness is only required within one tree.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarsError::CatalogUnavailable`] once if the catalog is
    /// unavailable, or [`SidebarsError::Invalid`] listing every failing
    /// sidebar with all of its errors.
    pub fn resolve_all(
        &self,
        sidebars: &Sidebars,
        catalog: &CatalogIndex,
    ) -> Result<ResolvedSidebars, SidebarsError> {
        if let Availability::Unavailable { reason } = catalog.availability() {
            return Err(SidebarsError::CatalogUnavailable(reason.clone()));
        }

        let results: Vec<_> = sidebars
            .entries()
            .par_iter()
            .map(|(name, tree)| (name, self.resolve(name, tree, catalog)))
            .collect();

        let mut trees = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (name, result) in results {
            match result {
                Ok(tree) => trees.push(tree),
                Err(ResolveError::Invalid(errors)) => failures.push(SidebarErrors {
                    sidebar: name.clone(),
                    errors,
                }),
                Err(ResolveError::CatalogUnavailable(reason)) => {
                    return Err(SidebarsError::CatalogUnavailable(reason));
                }
            }
        }

        if failures.is_empty() {
            tracing::info!(sidebars = trees.len(), "All sidebars resolved");
            Ok(ResolvedSidebars::new(trees))
        } else {
            Err(SidebarsError::Invalid(failures))
        }
    }
}

/// State of a single depth-first pass over one tree.
struct Walk<'a> {
    catalog: &'a CatalogIndex,
    max_depth: usize,
    /// Doc ids seen so far in this tree.
    seen: HashSet<&'a str>,
    /// Labels of the categories enclosing the current node.
    trail: Vec<&'a str>,
    errors: Vec<ValidationError>,
}

impl<'a> Walk<'a> {
    fn new(catalog: &'a CatalogIndex, max_depth: usize) -> Self {
        Self {
            catalog,
            max_depth,
            seen: HashSet::new(),
            trail: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Resolve sibling nodes at `depth`, collecting errors instead of stopping.
    ///
    /// Nodes that fail are left out of the returned list; the caller discards
    /// the list whenever any error was recorded.
    fn resolve_items(&mut self, items: &'a [NavNode], depth: usize) -> Vec<ResolvedNode> {
        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            let node = match item {
                NavNode::Doc(doc) => self.resolve_doc(doc).map(ResolvedNode::Doc),
                NavNode::Category(category) => self
                    .resolve_category(category, depth)
                    .map(ResolvedNode::Category),
            };
            resolved.extend(node);
        }
        resolved
    }

    fn resolve_doc(&mut self, doc: &'a DocRef) -> Option<ResolvedDoc> {
        // Only the first occurrence is looked up, so a missing id listed
        // twice yields one dangling and one duplicate error.
        if !self.seen.insert(&doc.id) {
            self.errors.push(ValidationError::DuplicateReference {
                id: doc.id.clone(),
                location: self.location(),
            });
            return None;
        }

        let Some(metadata) = self.catalog.lookup(&doc.id) else {
            self.errors.push(ValidationError::DanglingReference {
                id: doc.id.clone(),
                location: self.location(),
            });
            return None;
        };

        Some(ResolvedDoc {
            metadata: metadata.clone(),
            label: doc.label.clone(),
        })
    }

    fn resolve_category(
        &mut self,
        category: &'a Category,
        depth: usize,
    ) -> Option<ResolvedCategory> {
        if category.items.is_empty() {
            self.errors.push(ValidationError::EmptyCategory {
                label: category.label.clone(),
                location: self.location(),
            });
            return None;
        }

        self.trail.push(&category.label);

        // Children would sit one level below the category
        let result = if depth >= self.max_depth {
            self.errors.push(ValidationError::ExcessiveNesting {
                path: self.location(),
                max_depth: self.max_depth,
            });
            None
        } else {
            let items = self.resolve_items(&category.items, depth + 1);
            Some(ResolvedCategory {
                label: category.label.clone(),
                collapsed: category.collapsed,
                items,
            })
        };

        self.trail.pop();
        result
    }

    fn location(&self) -> Location {
        Location(self.trail.iter().map(|&label| label.to_owned()).collect())
    }
}
