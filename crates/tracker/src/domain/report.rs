#![forbid(unsafe_code)]

use super::Pid;
use serde::{Deserialize, Serialize};
use serde_with::{DurationNanoSeconds, serde_as};
use std::{fmt, time::Duration};

/// Point-in-time view of one process, rebuilt every tick.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
    pub pid: Pid,
    pub exe: String,
    pub active: bool,
    #[serde_as(as = "DurationNanoSeconds<u64>")]
    pub total_time: Duration,
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PID: {}, Exe: {}, Active: {}, Total Time: {:?}",
            self.pid, self.exe, self.active, self.total_time
        )
    }
}
