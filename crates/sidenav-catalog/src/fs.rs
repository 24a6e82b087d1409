//! Filesystem catalog source.
//!
//! Discovery is split in two phases. The walk only collects file locations;
//! building [`DocumentMetadata`] (reading front matter and headings) happens
//! afterwards in parallel.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use regex::Regex;

use crate::document::{DocumentMetadata, default_path_for_id};
use crate::front_matter::{parse_front_matter, split_front_matter};
use crate::source::{CatalogError, CatalogErrorKind, CatalogSource};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default document extensions.
const DEFAULT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Reference to a document file found during the walk.
#[derive(Debug, Clone)]
struct DocumentFile {
    /// Directory part of the id (e.g., "", "guides", "api/v2").
    dir_id: String,
    /// File stem (e.g., "installation").
    stem: String,
    /// Absolute path to the file.
    path: PathBuf,
}

/// Filesystem catalog source.
///
/// Walks a docs directory recursively and turns every markdown file into a
/// catalog entry. Hidden files and directories are skipped; symlinks are
/// followed.
///
/// # Document identity
///
/// - id: path relative to the root without extension (`guides/ecs.md` ->
///   `guides/ecs`); a front matter `id` replaces the file-name segment
/// - title: front matter `title` > first H1 heading > title-cased file name
/// - path: front matter `slug` (absolute, or relative to the file's
///   directory) > id with a trailing `index` collapsed
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use sidenav_catalog::{CatalogSource, FsSource};
///
/// let source = FsSource::new(PathBuf::from("docs"));
/// for doc in source.enumerate()? {
///     println!("{}: {}", doc.id, doc.title);
/// }
/// ```
pub struct FsSource {
    /// Root directory for documents.
    source_dir: PathBuf,
    /// Accepted file extensions (without dot).
    extensions: Vec<String>,
    /// Regex for extracting first H1 heading.
    h1_regex: Regex,
}

impl FsSource {
    /// Create a new filesystem source accepting `.md` and `.mdx` files.
    ///
    /// # Panics
    ///
    /// Panics if the internal regex for H1 heading extraction fails to compile.
    /// This should never happen as the regex is a compile-time constant.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        let extensions = DEFAULT_EXTENSIONS.iter().map(|&e| e.to_owned()).collect();
        Self::with_extensions(source_dir, extensions)
    }

    /// Create a new filesystem source with custom file extensions.
    ///
    /// # Panics
    ///
    /// Panics if the internal regex for H1 heading extraction fails to compile.
    #[must_use]
    pub fn with_extensions(source_dir: PathBuf, extensions: Vec<String>) -> Self {
        Self {
            source_dir,
            extensions,
            h1_regex: Regex::new(r"(?m)^#\s+(.+)$").unwrap(),
        }
    }

    /// Root directory this source enumerates.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Walk the directory tree and collect document files.
    ///
    /// Symlinks are followed. `ancestors` holds the canonical paths of the
    /// directories being walked, so a link back into one of them is skipped.
    /// Any unreadable entry fails the whole walk.
    fn scan_directory(
        &self,
        dir_path: &Path,
        dir_id: &str,
        ancestors: &mut Vec<PathBuf>,
        files: &mut Vec<DocumentFile>,
    ) -> Result<(), CatalogError> {
        let io_error = |e, path: &Path| CatalogError::io(e, path).with_backend(BACKEND);

        let canonical = fs::canonicalize(dir_path).map_err(|e| io_error(e, dir_path))?;
        if ancestors.contains(&canonical) {
            tracing::warn!(path = %dir_path.display(), "Skipping symlink cycle");
            return Ok(());
        }
        ancestors.push(canonical);

        let mut entries = fs::read_dir(dir_path)
            .map_err(|e| io_error(e, dir_path))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| io_error(e, dir_path))?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let metadata = fs::metadata(&path).map_err(|e| io_error(e, &path))?;

            if metadata.is_dir() {
                let child_id = join_id(dir_id, &name);
                self.scan_directory(&path, &child_id, ancestors, files)?;
            } else if self.is_document(&path) {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                files.push(DocumentFile {
                    dir_id: dir_id.to_owned(),
                    stem,
                    path,
                });
            }
        }

        ancestors.pop();
        Ok(())
    }

    /// Check whether a file has one of the accepted extensions.
    fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    /// Build a catalog entry from a discovered file.
    fn build_document(&self, file: &DocumentFile) -> Result<DocumentMetadata, CatalogError> {
        let content = fs::read_to_string(&file.path)
            .map_err(|e| CatalogError::io(e, &file.path).with_backend(BACKEND))?;

        let (yaml, body) = split_front_matter(&content);
        let front_matter = yaml.map(parse_front_matter).transpose().map_err(|e| {
            CatalogError::new(CatalogErrorKind::Parse)
                .with_backend(BACKEND)
                .with_path(&file.path)
                .with_source(e)
        })?;
        let front_matter = front_matter.unwrap_or_default();

        let id = join_id(
            &file.dir_id,
            front_matter.id.as_deref().unwrap_or(&file.stem),
        );

        let title = front_matter
            .title
            .or_else(|| self.extract_title(body))
            .unwrap_or_else(|| titlecase_from_slug(&file.stem.to_lowercase()));

        let path = match front_matter.slug.as_deref() {
            Some(slug) if slug.starts_with('/') => slug.to_owned(),
            Some(slug) if file.dir_id.is_empty() => format!("/{slug}"),
            Some(slug) => format!("/{}/{slug}", file.dir_id),
            None => default_path_for_id(&id),
        };

        Ok(DocumentMetadata { id, title, path })
    }

    /// Extract title from first H1 heading.
    fn extract_title(&self, body: &str) -> Option<String> {
        let caps = self.h1_regex.captures(body)?;
        Some(caps[1].trim().to_owned())
    }
}

impl CatalogSource for FsSource {
    fn enumerate(&self) -> Result<Vec<DocumentMetadata>, CatalogError> {
        if !self.source_dir.is_dir() {
            return Err(CatalogError::not_found(&self.source_dir).with_backend(BACKEND));
        }

        let mut files = Vec::new();
        self.scan_directory(&self.source_dir, "", &mut Vec::new(), &mut files)?;

        let documents = files
            .par_iter()
            .map(|file| self.build_document(file))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            source_dir = %self.source_dir.display(),
            document_count = documents.len(),
            "Catalog source enumerated"
        );

        Ok(documents)
    }
}

/// Join a directory id and a segment with `/`.
fn join_id(dir_id: &str, segment: &str) -> String {
    if dir_id.is_empty() {
        segment.to_owned()
    } else {
        format!("{dir_id}/{segment}")
    }
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// Replaces `-` and `_` with spaces, then capitalizes the first letter of each word.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_source_is_send_sync() {
        assert_send_sync::<FsSource>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn find<'a>(docs: &'a [DocumentMetadata], id: &str) -> &'a DocumentMetadata {
        docs.iter()
            .find(|d| d.id == id)
            .unwrap_or_else(|| panic!("document {id} not enumerated"))
    }

    #[test]
    fn test_titlecase_from_slug() {
        assert_eq!(titlecase_from_slug("setup-guide"), "Setup Guide");
        assert_eq!(titlecase_from_slug("my_page"), "My Page");
        assert_eq!(titlecase_from_slug("api"), "Api");
        assert_eq!(titlecase_from_slug(""), "");
    }

    #[test]
    fn test_enumerate_empty_dir() {
        let temp_dir = create_test_dir();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let docs = source.enumerate().unwrap();

        assert!(docs.is_empty());
    }

    #[test]
    fn test_enumerate_missing_dir_is_error() {
        let source = FsSource::new(PathBuf::from("/nonexistent/sidenav-docs"));
        let err = source.enumerate().unwrap_err();

        assert_eq!(err.kind, CatalogErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_enumerate_nested_ids() {
        let temp_dir = create_test_dir();
        let started = temp_dir.path().join("getting-started");
        fs::create_dir(&started).unwrap();
        fs::write(temp_dir.path().join("index.md"), "# Home").unwrap();
        fs::write(started.join("installation.md"), "# Installation").unwrap();
        fs::write(started.join("quick-start.mdx"), "# Quick Start").unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let docs = source.enumerate().unwrap();

        assert_eq!(docs.len(), 3);
        assert_eq!(find(&docs, "index").path, "/");
        assert_eq!(
            find(&docs, "getting-started/installation").path,
            "/getting-started/installation"
        );
        assert_eq!(
            find(&docs, "getting-started/quick-start").title,
            "Quick Start"
        );
    }

    #[test]
    fn test_enumerate_directory_index_path() {
        let temp_dir = create_test_dir();
        let guides = temp_dir.path().join("guides");
        fs::create_dir(&guides).unwrap();
        fs::write(guides.join("index.md"), "# Guides").unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let docs = source.enumerate().unwrap();

        assert_eq!(docs[0].id, "guides/index");
        assert_eq!(docs[0].path, "/guides");
    }

    #[test]
    fn test_enumerate_skips_hidden_and_other_files() {
        let temp_dir = create_test_dir();
        let hidden = temp_dir.path().join(".drafts");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("draft.md"), "# Draft").unwrap();
        fs::write(temp_dir.path().join(".secret.md"), "# Secret").unwrap();
        fs::write(temp_dir.path().join("logo.png"), "png").unwrap();
        fs::write(temp_dir.path().join("visible.md"), "# Visible").unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let docs = source.enumerate().unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "visible");
    }

    #[cfg(unix)]
    #[test]
    fn test_enumerate_follows_symlinks() {
        let temp_dir = create_test_dir();
        let real = temp_dir.path().join("real");
        let docs_dir = temp_dir.path().join("docs");
        fs::create_dir_all(real.join("api")).unwrap();
        fs::create_dir(&docs_dir).unwrap();
        fs::write(real.join("api/core.md"), "# Core").unwrap();
        fs::write(real.join("solo.md"), "# Solo").unwrap();
        std::os::unix::fs::symlink(real.join("api"), docs_dir.join("api")).unwrap();
        std::os::unix::fs::symlink(real.join("solo.md"), docs_dir.join("solo.md")).unwrap();

        let source = FsSource::new(docs_dir);
        let docs = source.enumerate().unwrap();

        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["api/core", "solo"]);
        assert_eq!(find(&docs, "api/core").title, "Core");
    }

    #[cfg(unix)]
    #[test]
    fn test_enumerate_skips_symlink_cycle() {
        let temp_dir = create_test_dir();
        let guides = temp_dir.path().join("guides");
        fs::create_dir(&guides).unwrap();
        fs::write(guides.join("ecs.md"), "# ECS").unwrap();
        std::os::unix::fs::symlink(temp_dir.path(), guides.join("loop")).unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let docs = source.enumerate().unwrap();

        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["guides/ecs"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_enumerate_broken_symlink_is_error() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("index.md"), "# Home").unwrap();
        std::os::unix::fs::symlink(
            temp_dir.path().join("gone.md"),
            temp_dir.path().join("dangling.md"),
        )
        .unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let err = source.enumerate().unwrap_err();

        assert_eq!(err.kind, CatalogErrorKind::NotFound);
        assert!(err.path.as_ref().unwrap().ends_with("dangling.md"));
    }

    #[test]
    fn test_enumerate_custom_extensions() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("a.md"), "# A").unwrap();
        fs::write(temp_dir.path().join("b.markdown"), "# B").unwrap();

        let source =
            FsSource::with_extensions(temp_dir.path().to_path_buf(), vec!["markdown".to_owned()]);
        let docs = source.enumerate().unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "b");
    }

    #[test]
    fn test_title_precedence() {
        let temp_dir = create_test_dir();
        fs::write(
            temp_dir.path().join("with-front-matter.md"),
            "---\ntitle: From Front Matter\n---\n# From Heading\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("with-heading.md"),
            "Intro\n\n# From Heading\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("input-system.md"), "No heading.").unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let docs = source.enumerate().unwrap();

        assert_eq!(find(&docs, "with-front-matter").title, "From Front Matter");
        assert_eq!(find(&docs, "with-heading").title, "From Heading");
        assert_eq!(find(&docs, "input-system").title, "Input System");
    }

    #[test]
    fn test_front_matter_id_replaces_file_segment() {
        let temp_dir = create_test_dir();
        let api = temp_dir.path().join("api");
        fs::create_dir(&api).unwrap();
        fs::write(api.join("01-core.md"), "---\nid: core\n---\n# Core").unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let docs = source.enumerate().unwrap();

        assert_eq!(docs[0].id, "api/core");
        assert_eq!(docs[0].path, "/api/core");
    }

    #[test]
    fn test_front_matter_slug() {
        let temp_dir = create_test_dir();
        let guides = temp_dir.path().join("guides");
        fs::create_dir(&guides).unwrap();
        fs::write(guides.join("a.md"), "---\nslug: /start-here\n---\n").unwrap();
        fs::write(guides.join("b.md"), "---\nslug: second\n---\n").unwrap();
        fs::write(temp_dir.path().join("c.md"), "---\nslug: third\n---\n").unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let docs = source.enumerate().unwrap();

        assert_eq!(find(&docs, "guides/a").path, "/start-here");
        assert_eq!(find(&docs, "guides/b").path, "/guides/second");
        assert_eq!(find(&docs, "c").path, "/third");
    }

    #[test]
    fn test_invalid_front_matter_is_parse_error() {
        let temp_dir = create_test_dir();
        fs::write(
            temp_dir.path().join("broken.md"),
            "---\ntitle: [oops\n---\n# Broken",
        )
        .unwrap();

        let source = FsSource::new(temp_dir.path().to_path_buf());
        let err = source.enumerate().unwrap_err();

        assert_eq!(err.kind, CatalogErrorKind::Parse);
        assert!(
            err.path
                .as_ref()
                .is_some_and(|p| p.ends_with("broken.md"))
        );
    }
}
