//! Mock catalog source for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem access.

use crate::document::DocumentMetadata;
use crate::source::{CatalogError, CatalogErrorKind, CatalogSource};

/// Mock catalog source for testing.
///
/// Holds documents in memory. Use the builder methods to configure the mock
/// with test data, or [`MockSource::failing`] to simulate a content source
/// that cannot be enumerated.
///
/// # Example
///
/// ```ignore
/// use sidenav_catalog::{CatalogIndex, MockSource};
///
/// let source = MockSource::new()
///     .with_document("install", "Installation")
///     .with_document("guides/ecs", "ECS");
///
/// let catalog = CatalogIndex::build(&source);
/// assert!(catalog.contains("guides/ecs"));
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    documents: Vec<DocumentMetadata>,
    fail: bool,
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source whose enumeration always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            documents: Vec::new(),
            fail: true,
        }
    }

    /// Add a document with the given id and title; the path is derived from the id.
    #[must_use]
    pub fn with_document(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.documents.push(DocumentMetadata::from_id(id, title));
        self
    }

    /// Add a fully specified document.
    #[must_use]
    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.documents.push(metadata);
        self
    }
}

impl CatalogSource for MockSource {
    fn enumerate(&self) -> Result<Vec<DocumentMetadata>, CatalogError> {
        if self.fail {
            return Err(CatalogError::new(CatalogErrorKind::Unavailable).with_backend("Mock"));
        }
        Ok(self.documents.clone())
    }
}
