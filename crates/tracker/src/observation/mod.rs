#![forbid(unsafe_code)]

mod source;
mod sysinfo_source;

pub use source::{LookupError, LookupField, ProcessSample, ProcessSource, SourceError};
pub use sysinfo_source::SysinfoSource;
