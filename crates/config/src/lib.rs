#![forbid(unsafe_code)]

mod accumulation;
mod error;
mod report;
mod tracker;

pub use accumulation::Accumulation;
pub use error::Error;
pub use report::{DEFAULT_REPORT_PATH, Report};
pub use tracker::Tracker;

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub tracker: Tracker,
    pub report: Report,
}

impl Config {
    /// Compiled-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TOML file on top of the defaults. Keys missing from the file
    /// keep their default value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(contents))
            .extract()?;
        Ok(config)
    }
}
