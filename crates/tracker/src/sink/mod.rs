#![forbid(unsafe_code)]

mod console;
mod json_file;

pub use console::ConsoleSink;
pub use json_file::JsonFileSink;

use crate::domain::ProcessReport;
use crate::error::Error;
use async_trait::async_trait;

/// Destination for the reports produced by a tick.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &'static str;

    async fn publish(&self, reports: &[ProcessReport]) -> Result<(), Error>;
}
