//! YAML front matter parsing for markdown documents.
//!
//! Only the fields that affect catalog identity are read; everything else in
//! the front matter block belongs to the rendering pipeline.

use serde::Deserialize;

/// Catalog-relevant front matter fields.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub(crate) struct FrontMatter {
    /// Replaces the file-name segment of the document id.
    pub id: Option<String>,
    /// Canonical title (overrides H1 extraction).
    pub title: Option<String>,
    /// Output path override.
    pub slug: Option<String>,
}

/// Front matter parse error.
#[derive(Debug, thiserror::Error)]
#[error("Invalid front matter: {0}")]
pub(crate) struct FrontMatterError(#[from] serde_yaml::Error);

/// Split a markdown document into its front matter block and body.
///
/// Front matter must start on the first line with `---` and end with a line
/// containing only `---`. Returns `(None, content)` when there is no block.
pub(crate) fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    // Unterminated block is treated as regular content
    (None, content)
}

/// Parse catalog fields from a front matter block.
///
/// Empty blocks yield a default instance.
pub(crate) fn parse_front_matter(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Ok(FrontMatter::default());
    }
    Ok(serde_yaml::from_str(trimmed)?)
}
