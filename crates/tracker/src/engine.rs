#![forbid(unsafe_code)]

use crate::clock::{Clock, SystemClock};
use crate::domain::ProcessReport;
use crate::error::Error;
use crate::observation::{ProcessSource, SysinfoSource};
use crate::sink::{ConsoleSink, JsonFileSink, ReportSink};
use crate::tracker::ActivityTracker;
use config::Config;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

/// Fixed sampling period.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(10);

pub struct Services {
    pub source: Box<dyn ProcessSource + Send>,
    pub clock: Box<dyn Clock + Send + Sync>,
    pub sinks: Vec<Box<dyn ReportSink + Send + Sync>>,
}

impl Services {
    /// sysinfo-backed source, wall clock, console then JSON file output.
    pub fn system(config: &Config) -> Self {
        Self {
            source: Box::new(SysinfoSource::new()),
            clock: Box::new(SystemClock),
            sinks: vec![
                Box::new(ConsoleSink::stdout()),
                Box::new(JsonFileSink::new(config.report.path.clone())),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick_id: u64,
    pub reports: Vec<ProcessReport>,
    /// Number of sinks that failed to publish this tick.
    pub sink_failures: usize,
}

pub struct Engine {
    services: Services,
    tracker: ActivityTracker,
    tick_id: u64,
}

impl Engine {
    pub fn new(config: Config, services: Services) -> Self {
        Self {
            services,
            tracker: ActivityTracker::new(config.tracker),
            tick_id: 0,
        }
    }

    /// Sample, reconcile and publish once. A source failure leaves the
    /// tracker and every sink untouched.
    pub async fn tick(&mut self) -> Result<TickReport, Error> {
        self.tick_id = self.tick_id.saturating_add(1);
        let span = tracing::debug_span!("tick", tick_id = self.tick_id);
        self.tick_inner().instrument(span).await
    }

    async fn tick_inner(&mut self) -> Result<TickReport, Error> {
        let samples = self.services.source.snapshot()?;
        let now = self.services.clock.now();
        let reports = self.tracker.reconcile_tick(now, samples);

        let mut sink_failures = 0;
        for sink in &self.services.sinks {
            if let Err(err) = sink.publish(&reports).await {
                warn!(sink = sink.name(), %err, "failed to publish report");
                sink_failures += 1;
            }
        }

        debug!(
            reported = reports.len(),
            tracked = self.tracker.len(),
            sink_failures,
            "tick complete"
        );

        Ok(TickReport {
            tick_id: self.tick_id,
            reports,
            sink_failures,
        })
    }

    /// Tick immediately and then every [`SAMPLE_INTERVAL`] until `cancel`
    /// fires. Cancellation is only observed between ticks.
    pub async fn run_until(&mut self, cancel: CancellationToken) {
        info!(interval = ?SAMPLE_INTERVAL, "sampling started");
        while !cancel.is_cancelled() {
            let tick_start = self.services.clock.now();
            if let Err(err) = self.tick().await {
                warn!(%err, tick_id = self.tick_id, "tick skipped");
            }

            let elapsed = self
                .services
                .clock
                .now()
                .saturating_duration_since(tick_start);
            let sleep_for = SAMPLE_INTERVAL.saturating_sub(elapsed);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = self.services.clock.sleep(sleep_for) => {}
            }
        }
        info!(ticks = self.tick_id, "shutdown requested");
    }

    /// Read-only access to the tracked state (useful for tests).
    pub fn tracker(&self) -> &ActivityTracker {
        &self.tracker
    }
}
