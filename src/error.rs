//! Errors that stop a generator run.
//!
//! Problems with individual declarations never end up here: they are
//! reported as [`Diagnostic`](crate::Diagnostic)s and the run continues.

use std::path::PathBuf;

use sbgen_emit::MappingError;
use sbgen_parser::FrontendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Frontend(#[from] FrontendError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
