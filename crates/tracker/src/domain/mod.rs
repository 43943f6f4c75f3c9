#![forbid(unsafe_code)]

mod ids;
mod report;
mod status;
mod tracked;

pub use ids::Pid;
pub use report::ProcessReport;
pub use status::ProcessStatus;
pub use tracked::TrackedProcess;
