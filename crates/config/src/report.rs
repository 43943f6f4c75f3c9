#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_REPORT_PATH: &str = "process_info.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Report {
    /// File the JSON snapshot is written to, relative to the working
    /// directory unless absolute.
    pub path: PathBuf,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}
