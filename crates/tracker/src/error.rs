#![forbid(unsafe_code)]

use crate::observation::SourceError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source error: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("console error: {0}")]
    Console(#[source] std::io::Error),
}
