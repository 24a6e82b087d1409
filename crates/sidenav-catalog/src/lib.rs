//! Document catalog for sidenav.
//!
//! This crate answers one question for the tree resolver: does a document
//! id exist, and what is its canonical title and output path?
//!
//! # Architecture
//!
//! The crate provides:
//! - [`CatalogSource`] trait for enumerating documents from a content source
//! - [`FsSource`] implementation that walks a markdown directory
//! - [`CatalogIndex`], the immutable lookup built once per resolution pass
//! - [`MockSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use sidenav_catalog::{CatalogIndex, FsSource};
//!
//! let source = FsSource::new(PathBuf::from("docs"));
//! let catalog = CatalogIndex::build(&source);
//! if let Some(doc) = catalog.lookup("getting-started/installation") {
//!     println!("{} -> {}", doc.title, doc.path);
//! }
//! ```

mod document;
mod front_matter;
mod fs;
mod index;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use document::DocumentMetadata;
pub use fs::FsSource;
pub use index::{Availability, CatalogIndex};
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{CatalogError, CatalogErrorKind, CatalogSource};
