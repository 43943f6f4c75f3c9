#![forbid(unsafe_code)]

use crate::domain::{Pid, ProcessStatus};
use std::{fmt, path::PathBuf};

pub trait ProcessSource {
    /// Enumerate the visible processes. Per-process lookups that fail are
    /// reported inside the sample; only a failure to read the process table
    /// as a whole is an error.
    fn snapshot(&mut self) -> Result<Vec<ProcessSample>, SourceError>;
}

/// One process as seen by the source during a single enumeration.
#[derive(Debug, Clone)]
pub struct ProcessSample {
    pub pid: Pid,
    pub exe: Result<PathBuf, LookupError>,
    pub status: Result<ProcessStatus, LookupError>,
}

impl ProcessSample {
    pub fn new(pid: impl Into<Pid>, exe: impl Into<PathBuf>, status: ProcessStatus) -> Self {
        Self {
            pid: pid.into(),
            exe: Ok(exe.into()),
            status: Ok(status),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("process table unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupField {
    Status,
    Executable,
}

impl fmt::Display for LookupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status => f.write_str("status"),
            Self::Executable => f.write_str("executable path"),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to read {field} of pid {pid}: {reason}")]
pub struct LookupError {
    pub pid: Pid,
    pub field: LookupField,
    pub reason: String,
}

impl LookupError {
    pub fn new(pid: Pid, field: LookupField, reason: impl Into<String>) -> Self {
        Self {
            pid,
            field,
            reason: reason.into(),
        }
    }
}
