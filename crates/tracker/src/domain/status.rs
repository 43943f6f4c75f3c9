#![forbid(unsafe_code)]

use std::{convert::Infallible, fmt, str::FromStr};

/// Coarse scheduler state of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessStatus {
    Running,
    Sleeping,
    Stopped,
    Zombie,
    Idle,
    Unknown,
}

impl ProcessStatus {
    /// Running and sleeping processes count as active, nothing else does.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Sleeping)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Sleeping => "sleeping",
            Self::Stopped => "stopped",
            Self::Zombie => "zombie",
            Self::Idle => "idle",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the lowercase names and the single letter codes used by `ps`.
/// Anything unrecognised is `Unknown`.
impl FromStr for ProcessStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "running" | "R" => Self::Running,
            "sleeping" | "S" => Self::Sleeping,
            "stopped" | "T" => Self::Stopped,
            "zombie" | "Z" => Self::Zombie,
            "idle" | "I" => Self::Idle,
            _ => Self::Unknown,
        })
    }
}

impl From<sysinfo::ProcessStatus> for ProcessStatus {
    fn from(status: sysinfo::ProcessStatus) -> Self {
        match status {
            sysinfo::ProcessStatus::Run => Self::Running,
            sysinfo::ProcessStatus::Sleep => Self::Sleeping,
            sysinfo::ProcessStatus::Stop => Self::Stopped,
            sysinfo::ProcessStatus::Zombie => Self::Zombie,
            sysinfo::ProcessStatus::Idle => Self::Idle,
            _ => Self::Unknown,
        }
    }
}
