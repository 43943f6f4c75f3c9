#![forbid(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
