#![forbid(unsafe_code)]

use super::Pid;
use config::Accumulation;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedProcess {
    pub pid: Pid,
    pub first_seen_at: Instant,
    pub is_active: bool,
    pub accumulated_active_time: Duration,
    pub last_seen_tick: u64,
    pub last_observed_at: Instant,
}

impl TrackedProcess {
    pub fn new(pid: Pid, now: Instant, tick: u64) -> Self {
        Self {
            pid,
            first_seen_at: now,
            is_active: false,
            accumulated_active_time: Duration::ZERO,
            last_seen_tick: tick,
            last_observed_at: now,
        }
    }

    /// Record one observation. Only active observations grow the total.
    pub fn observe(&mut self, now: Instant, tick: u64, active: bool, rule: Accumulation) {
        self.is_active = active;
        if active {
            let since = match rule {
                Accumulation::SinceFirstSeen => self.first_seen_at,
                Accumulation::Interval => self.last_observed_at,
            };
            self.accumulated_active_time = self
                .accumulated_active_time
                .saturating_add(now.saturating_duration_since(since));
        }
        self.last_seen_tick = tick;
        self.last_observed_at = now;
    }
}
