//! CLI error types.

use std::path::PathBuf;

use wt_config::ConfigError;
use wt_website::ParseError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid resource tree in {}: {source}", path.display())]
    Input {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
