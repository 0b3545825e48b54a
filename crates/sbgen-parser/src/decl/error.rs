use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a declaration dump.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed declaration dump: {0}")]
    Json(#[from] serde_json::Error),
}
