//! Catalog entry type.

use serde::{Deserialize, Serialize};

/// Metadata for one document known to the catalog.
///
/// # Path Convention
///
/// `id` is the catalog identifier authors reference from sidebars
/// (e.g., `"getting-started/installation"`). `path` is the output URL path
/// with a leading slash (e.g., `"/getting-started/installation"`, `"/"` for
/// the root index).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Catalog identifier.
    pub id: String,
    /// Canonical document title.
    pub title: String,
    /// Output URL path.
    pub path: String,
}

impl DocumentMetadata {
    /// Create a new catalog entry.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            path: path.into(),
        }
    }

    /// Create an entry whose output path is derived from its id.
    ///
    /// A trailing `index` segment maps to its directory:
    /// - `"index"` -> `"/"`
    /// - `"guide/index"` -> `"/guide"`
    /// - `"guide/setup"` -> `"/guide/setup"`
    #[must_use]
    pub fn from_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        let path = default_path_for_id(&id);
        Self::new(id, title, path)
    }
}

/// Derive the output URL path for a document id.
pub(crate) fn default_path_for_id(id: &str) -> String {
    let trimmed = if id == "index" {
        ""
    } else {
        id.strip_suffix("/index").unwrap_or(id)
    };
    format!("/{trimmed}")
}
