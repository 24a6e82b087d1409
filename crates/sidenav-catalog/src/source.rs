//! Catalog source trait and error types.
//!
//! Provides the [`CatalogSource`] trait for enumerating documents from the
//! content pipeline, along with [`CatalogError`] for unified error handling
//! across backends.

use std::path::PathBuf;

use crate::document::DocumentMetadata;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    /// Content root does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Content could not be read.
    Io,
    /// Document front matter is malformed.
    Parse,
    /// Backend is temporarily unavailable.
    Unavailable,
}

/// Catalog enumeration error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct CatalogError {
    /// Semantic error category.
    pub kind: CatalogErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CatalogError {
    /// Create a new catalog error.
    #[must_use]
    pub fn new(kind: CatalogErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(CatalogErrorKind::NotFound).with_path(path)
    }

    /// Create a catalog error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => CatalogErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => CatalogErrorKind::PermissionDenied,
            _ => CatalogErrorKind::Io,
        };
        Self::new(kind).with_source(err).with_path(path)
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            CatalogErrorKind::NotFound => "Not found",
            CatalogErrorKind::PermissionDenied => "Permission denied",
            CatalogErrorKind::Io => "I/O error",
            CatalogErrorKind::Parse => "Parse error",
            CatalogErrorKind::Unavailable => "Unavailable",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Content source that enumerates every known document.
///
/// The content pipeline owns the documents; this crate only consumes the
/// enumeration. Implementations must either return the complete document
/// list or an error, never a partial list.
pub trait CatalogSource: Send + Sync {
    /// Enumerate all documents.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the content source cannot be enumerated
    /// (e.g., missing root directory, permission denied).
    fn enumerate(&self) -> Result<Vec<DocumentMetadata>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_display_full() {
        let err = CatalogError::new(CatalogErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("/docs");

        assert_eq!(err.to_string(), "[Fs] Not found (path: /docs)");
    }

    #[test]
    fn test_display_with_source() {
        let io = std::io::Error::other("disk on fire");
        let err = CatalogError::io(io, "/docs/guide.md");

        assert_eq!(err.kind, CatalogErrorKind::Io);
        assert_eq!(
            err.to_string(),
            "I/O error: disk on fire (path: /docs/guide.md)"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_maps_kind() {
        let not_found = std::io::Error::from(std::io::ErrorKind::NotFound);
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);

        assert_eq!(
            CatalogError::io(not_found, "/a").kind,
            CatalogErrorKind::NotFound
        );
        assert_eq!(
            CatalogError::io(denied, "/a").kind,
            CatalogErrorKind::PermissionDenied
        );
    }
}
