//! Sidebars file loading.
//!
//! The format is picked from the file extension: `.json`, or `.yaml`/`.yml`.

use std::path::Path;

use crate::error::LoadError;
use crate::model::Sidebars;

/// Supported sidebars file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarsFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl SidebarsFormat {
    /// Detect the format from a file extension.
    ///
    /// Returns `None` for unsupported extensions.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl Sidebars {
    /// Load sidebars from a JSON or YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be read, has an unsupported
    /// extension, or does not match the sidebar schema.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let format = SidebarsFormat::from_path(path)
            .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let sidebars = match format {
            SidebarsFormat::Json => {
                serde_json::from_str(&content).map_err(|source| LoadError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            SidebarsFormat::Yaml => {
                serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        };

        tracing::debug!(path = %path.display(), ?format, "Sidebars loaded");
        Ok(sidebars)
    }
}
