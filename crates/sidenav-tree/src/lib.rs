//! Navigation tree model and resolver for sidenav.
//!
//! This crate provides:
//! - [`Sidebars`], [`NavTree`] and [`NavNode`]: the declarative tree authors edit
//! - [`Resolver`]: validation against a [`CatalogIndex`](sidenav_catalog::CatalogIndex)
//! - [`ResolvedTree`]: the render-ready tree handed to the rendering layer
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::{Path, PathBuf};
//! use sidenav_catalog::{CatalogIndex, FsSource};
//! use sidenav_tree::{Resolver, Sidebars};
//!
//! let catalog = CatalogIndex::build(&FsSource::new(PathBuf::from("docs")));
//! let sidebars = Sidebars::load(Path::new("sidebars.json"))?;
//!
//! let resolved = Resolver::default().resolve_all(&sidebars, &catalog)?;
//! let json = serde_json::to_string_pretty(&resolved)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod load;
mod model;
mod resolved;
mod resolver;

pub use error::{LoadError, Location, ResolveError, SidebarErrors, SidebarsError, ValidationError};
pub use load::SidebarsFormat;
pub use model::{Category, DocRef, DuplicateSidebar, NavNode, NavTree, Sidebars};
pub use resolved::{ResolvedCategory, ResolvedDoc, ResolvedNode, ResolvedSidebars, ResolvedTree};
pub use resolver::{DEFAULT_MAX_DEPTH, Resolver, ResolverConfig};
