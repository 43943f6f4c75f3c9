#![forbid(unsafe_code)]

use crate::accumulation::Accumulation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Tracker {
    /// Rule used to grow the accumulated active time.
    pub accumulation: Accumulation,

    /// Drop entries not observed for this many ticks. `None` keeps every
    /// entry for the lifetime of the monitor.
    pub evict_after_ticks: Option<u64>,
}

impl Tracker {
    /// Returns true if `last_seen_tick` is too old to keep at `current_tick`.
    pub fn is_stale(&self, last_seen_tick: u64, current_tick: u64) -> bool {
        self.evict_after_ticks
            .is_some_and(|limit| current_tick.saturating_sub(last_seen_tick) > limit)
    }
}
