#![forbid(unsafe_code)]

use super::ReportSink;
use crate::domain::ProcessReport;
use crate::error::Error;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes the whole report as a JSON array, replacing the previous file.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReportSink for JsonFileSink {
    fn name(&self) -> &'static str {
        "json"
    }

    async fn publish(&self, reports: &[ProcessReport]) -> Result<(), Error> {
        let json = serde_json::to_vec(reports)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| Error::Persist {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = reports.len(), "report persisted");
        Ok(())
    }
}
