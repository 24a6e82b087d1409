//! CLI error types.

use sidenav_config::ConfigError;
use sidenav_tree::{LoadError, SidebarsError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Sidebars(#[from] SidebarsError),

    #[error("Failed to serialize resolved sidebars: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
