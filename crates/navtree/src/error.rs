//! CLI error types.

use std::path::PathBuf;

use navtree_config::ConfigError;
use navtree_model::MalformedTreeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: MalformedTreeError,
    },

    #[error("{0}")]
    Malformed(#[from] MalformedTreeError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
