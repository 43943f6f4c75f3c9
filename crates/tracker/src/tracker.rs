#![forbid(unsafe_code)]

use crate::domain::{Pid, ProcessReport, ProcessStatus, TrackedProcess};
use crate::observation::ProcessSample;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

/// Per-pid activity accounting across ticks.
///
/// Entries are created the first time a pid is observed and are only
/// removed when `evict_after_ticks` is configured. A pid reused by the OS
/// therefore inherits the accumulated time of its previous owner unless the
/// old entry was evicted in between.
#[derive(Debug)]
pub struct ActivityTracker {
    config: config::Tracker,
    processes: HashMap<Pid, TrackedProcess>,
    ticks: u64,
}

impl ActivityTracker {
    pub fn new(config: config::Tracker) -> Self {
        Self {
            config,
            processes: HashMap::new(),
            ticks: 0,
        }
    }

    /// Fold one enumeration into the tracked state and report on every
    /// sampled process. Lookup failures degrade to an empty path or an
    /// inactive classification for that process only.
    pub fn reconcile_tick(
        &mut self,
        now: Instant,
        samples: Vec<ProcessSample>,
    ) -> Vec<ProcessReport> {
        self.ticks = self.ticks.saturating_add(1);
        let tick = self.ticks;
        let mut reports = Vec::with_capacity(samples.len());

        for ProcessSample { pid, exe, status } in samples {
            let status = status.unwrap_or_else(|err| {
                warn!(%pid, %err, "status lookup failed, treating as inactive");
                ProcessStatus::Unknown
            });
            let exe = match exe {
                Ok(path) => path.to_string_lossy().into_owned(),
                Err(err) => {
                    warn!(%pid, %err, "executable lookup failed");
                    String::new()
                }
            };

            let entry = self
                .processes
                .entry(pid)
                .or_insert_with(|| TrackedProcess::new(pid, now, tick));
            entry.observe(now, tick, status.is_active(), self.config.accumulation);

            reports.push(ProcessReport {
                pid,
                exe,
                active: entry.is_active,
                total_time: entry.accumulated_active_time,
            });
        }

        self.evict_stale(tick);
        reports
    }

    fn evict_stale(&mut self, tick: u64) {
        if self.config.evict_after_ticks.is_none() {
            return;
        }
        let before = self.processes.len();
        let config = &self.config;
        self.processes
            .retain(|_, process| !config.is_stale(process.last_seen_tick, tick));
        let evicted = before - self.processes.len();
        if evicted > 0 {
            debug!(evicted, remaining = self.processes.len(), "evicted stale processes");
        }
    }

    pub fn get(&self, pid: Pid) -> Option<&TrackedProcess> {
        self.processes.get(&pid)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Number of ticks reconciled so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
