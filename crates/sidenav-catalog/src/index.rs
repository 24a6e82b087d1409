//! Immutable document lookup.

use std::collections::HashMap;

use crate::document::DocumentMetadata;
use crate::source::CatalogSource;

/// Whether the content source could be enumerated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Availability {
    /// The source was enumerated completely.
    Available,
    /// The source could not be enumerated; the index is empty.
    Unavailable {
        /// Human-readable cause, taken from the enumeration error.
        reason: String,
    },
}

/// Catalog Index: every known document keyed by id.
///
/// Built once per resolution pass and never mutated afterwards, so it can be
/// shared by reference across threads while several sidebars resolve.
///
/// An index built from a failing source is *unavailable*: it holds no
/// documents, every lookup returns `None`, and the resolver reports the
/// failure instead of a flood of dangling references.
#[derive(Clone, Debug)]
pub struct CatalogIndex {
    documents: HashMap<String, DocumentMetadata>,
    availability: Availability,
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self {
            documents: HashMap::new(),
            availability: Availability::Available,
        }
    }
}

impl CatalogIndex {
    /// Enumerate a source into an index.
    ///
    /// Enumeration failures are logged and produce an unavailable index.
    pub fn build(source: &dyn CatalogSource) -> Self {
        match source.enumerate() {
            Ok(documents) => {
                let index = Self::from_documents(documents);
                tracing::info!(document_count = index.len(), "Catalog index built");
                index
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to enumerate catalog source");
                Self::unavailable(e.to_string())
            }
        }
    }

    /// Build an available index from documents.
    ///
    /// When an id occurs more than once, the first entry wins.
    pub fn from_documents(documents: impl IntoIterator<Item = DocumentMetadata>) -> Self {
        let mut map: HashMap<String, DocumentMetadata> = HashMap::new();
        for doc in documents {
            if let Some(existing) = map.get(&doc.id) {
                tracing::warn!(
                    id = %doc.id,
                    kept = %existing.path,
                    ignored = %doc.path,
                    "Duplicate document id in catalog source"
                );
                continue;
            }
            map.insert(doc.id.clone(), doc);
        }
        Self {
            documents: map,
            availability: Availability::Available,
        }
    }

    /// Create an empty, unavailable index.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            documents: HashMap::new(),
            availability: Availability::Unavailable {
                reason: reason.into(),
            },
        }
    }

    /// Look up a document by id.
    ///
    /// Returns `None` when the id is not in the catalog.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&DocumentMetadata> {
        self.documents.get(id)
    }

    /// Check whether a document id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Availability of the underlying source.
    #[must_use]
    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Whether the underlying source was enumerated.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All document ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over documents in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentMetadata> {
        self.documents.values()
    }
}
