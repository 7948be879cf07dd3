//! CLI error types.

use docnav_tree::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] docnav_config::ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{failed} of {total} config file(s) failed the check")]
    Check { failed: usize, total: usize },

    #[error("{0}")]
    Validation(String),
}
