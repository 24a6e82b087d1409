//! Resolution error types.

use std::fmt;
use std::path::PathBuf;

/// Location of a node inside a tree: enclosing category labels from the root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location(pub Vec<String>);

impl Location {
    /// Whether the node sits at the top level of its tree.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("top level")
        } else {
            f.write_str(&self.0.join(" > "))
        }
    }
}

/// A single problem found while walking a tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A doc reference names an id the catalog does not contain.
    #[error("Unknown document id \"{id}\" (in {location})")]
    DanglingReference {
        /// Unresolved id.
        id: String,
        /// Where the reference appears.
        location: Location,
    },
    /// A category has no items.
    #[error("Category \"{label}\" has no items (in {location})")]
    EmptyCategory {
        /// Category label.
        label: String,
        /// Where the category appears.
        location: Location,
    },
    /// A document id is referenced more than once in the same tree.
    #[error("Document \"{id}\" is already listed in this sidebar (in {location})")]
    DuplicateReference {
        /// Repeated id.
        id: String,
        /// Where the repeated reference appears.
        location: Location,
    },
    /// A category nests deeper than allowed; its branch was not checked.
    #[error("Category \"{path}\" nests deeper than {max_depth} levels")]
    ExcessiveNesting {
        /// Labels from the root down to the offending category.
        path: Location,
        /// Configured depth limit.
        max_depth: usize,
    },
}

/// Error returned by [`Resolver::resolve`](crate::Resolver::resolve).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The catalog source could not be enumerated; no tree was walked.
    #[error("Document catalog unavailable: {0}")]
    CatalogUnavailable(String),
    /// The tree has validation errors, listed in walk order.
    #[error("Sidebar has {} validation error(s)", .0.len())]
    Invalid(Vec<ValidationError>),
}

impl ResolveError {
    /// Validation errors, empty for [`ResolveError::CatalogUnavailable`].
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::CatalogUnavailable(_) => &[],
            Self::Invalid(errors) => errors,
        }
    }
}

/// Validation errors of one named sidebar.
#[derive(Debug, PartialEq, Eq)]
pub struct SidebarErrors {
    /// Sidebar name.
    pub sidebar: String,
    /// Errors in walk order.
    pub errors: Vec<ValidationError>,
}

/// Error returned by [`Resolver::resolve_all`](crate::Resolver::resolve_all).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SidebarsError {
    /// The catalog source could not be enumerated; no tree was walked.
    #[error("Document catalog unavailable: {0}")]
    CatalogUnavailable(String),
    /// At least one sidebar is invalid. Only failing sidebars are listed.
    #[error("{} validation error(s) in {} sidebar(s)", total_errors(.0), .0.len())]
    Invalid(Vec<SidebarErrors>),
}

fn total_errors(sidebars: &[SidebarErrors]) -> usize {
    sidebars.iter().map(|s| s.errors.len()).sum()
}

/// Error loading a sidebars file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// I/O error.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// JSON parse error.
    #[error("Invalid sidebars JSON in {}: {source}", path.display())]
    Json {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// YAML parse error.
    #[error("Invalid sidebars YAML in {}: {source}", path.display())]
    Yaml {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: serde_yaml::Error,
    },
    /// File extension is not `.json`, `.yaml` or `.yml`.
    #[error("Unsupported sidebars file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
