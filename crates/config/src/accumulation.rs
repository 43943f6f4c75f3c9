#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// How much time an active observation adds to a process's running total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Accumulation {
    /// Add the full age of the entry (now minus first sighting) on every
    /// active tick.
    #[default]
    SinceFirstSeen,
    /// Add only the time elapsed since the previous observation of the pid.
    Interval,
}
