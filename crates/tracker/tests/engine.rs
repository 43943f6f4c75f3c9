#![forbid(unsafe_code)]

use async_trait::async_trait;
use config::Config;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;
use tracker::clock::Clock;
use tracker::domain::{Pid, ProcessReport, ProcessStatus};
use tracker::observation::{LookupError, LookupField, ProcessSample, ProcessSource, SourceError};
use tracker::sink::{JsonFileSink, ReportSink};
use tracker::{Engine, Error, SAMPLE_INTERVAL, Services};

type Snapshot = Result<Vec<ProcessSample>, SourceError>;

struct ScriptedSource(VecDeque<Snapshot>);

impl ScriptedSource {
    fn new(script: impl IntoIterator<Item = Snapshot>) -> Self {
        Self(script.into_iter().collect())
    }
}

impl ProcessSource for ScriptedSource {
    fn snapshot(&mut self) -> Snapshot {
        self.0
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Unavailable("script exhausted".into())))
    }
}

/// Time only moves through `advance` or `sleep`. Cancels `cancel` once
/// `cancel_after` sleeps have happened.
struct ManualClock {
    now: Mutex<Instant>,
    sleeps: AtomicUsize,
    cancel_after: usize,
    cancel: CancellationToken,
}

impl ManualClock {
    fn new(cancel_after: usize, cancel: CancellationToken) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Instant::now()),
            sleeps: AtomicUsize::new(0),
            cancel_after,
            cancel,
        })
    }

    fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        if self.sleeps.fetch_add(1, Ordering::SeqCst) + 1 >= self.cancel_after {
            self.cancel.cancel();
        }
    }
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Vec<ProcessReport>>>>);

impl Recorder {
    fn published(&self) -> Vec<Vec<ProcessReport>> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportSink for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    async fn publish(&self, reports: &[ProcessReport]) -> Result<(), Error> {
        self.0.lock().unwrap().push(reports.to_vec());
        Ok(())
    }
}

struct Broken;

#[async_trait]
impl ReportSink for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn publish(&self, _reports: &[ProcessReport]) -> Result<(), Error> {
        Err(Error::Console(std::io::Error::other("stdout closed")))
    }
}

fn foo_running() -> Snapshot {
    Ok(vec![ProcessSample::new(42u32, "/bin/foo", ProcessStatus::Running)])
}

fn engine(
    source: ScriptedSource,
    clock: Arc<ManualClock>,
    sinks: Vec<Box<dyn ReportSink + Send + Sync>>,
) -> Engine {
    Engine::new(
        Config::default(),
        Services {
            source: Box::new(source),
            clock: Box::new(clock),
            sinks,
        },
    )
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

#[tokio::test]
async fn end_to_end_accumulates_full_age() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("process_info.json");
    let clock = ManualClock::new(usize::MAX, CancellationToken::new());
    let source = ScriptedSource::new([foo_running(), foo_running(), foo_running()]);
    let mut engine = engine(source, clock.clone(), vec![Box::new(JsonFileSink::new(&path))]);

    engine.tick().await.unwrap();
    assert_eq!(
        read_json(&path),
        serde_json::json!([{ "pid": 42, "exe": "/bin/foo", "active": true, "total_time": 0 }])
    );

    clock.advance(SAMPLE_INTERVAL);
    let second = engine.tick().await.unwrap();
    assert_eq!(second.tick_id, 2);
    assert_eq!(second.reports[0].total_time, Duration::from_secs(10));
    assert_eq!(read_json(&path)[0]["total_time"], 10_000_000_000u64);

    clock.advance(SAMPLE_INTERVAL);
    let third = engine.tick().await.unwrap();
    assert_eq!(third.reports[0].total_time, Duration::from_secs(30));

    let persisted: Vec<ProcessReport> =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(persisted, third.reports);
}

#[tokio::test]
async fn source_failure_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("process_info.json");
    let clock = ManualClock::new(usize::MAX, CancellationToken::new());
    let source = ScriptedSource::new([
        foo_running(),
        Err(SourceError::Unavailable("/proc not mounted".into())),
        foo_running(),
    ]);
    let mut engine = engine(source, clock.clone(), vec![Box::new(JsonFileSink::new(&path))]);

    engine.tick().await.unwrap();
    let before = std::fs::read(&path).unwrap();

    clock.advance(SAMPLE_INTERVAL);
    let err = engine.tick().await.unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable(_)));
    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert_eq!(engine.tracker().ticks(), 1);

    clock.advance(SAMPLE_INTERVAL);
    let report = engine.tick().await.unwrap();
    assert_eq!(report.reports[0].total_time, Duration::from_secs(20));
    assert_eq!(engine.tracker().ticks(), 2);
}

#[tokio::test]
async fn lookup_failure_still_reports_other_processes() {
    let recorder = Recorder::default();
    let clock = ManualClock::new(usize::MAX, CancellationToken::new());
    let vanished = ProcessSample {
        pid: Pid::new(7),
        exe: Err(LookupError::new(Pid::new(7), LookupField::Executable, "exited")),
        status: Err(LookupError::new(Pid::new(7), LookupField::Status, "exited")),
    };
    let source = ScriptedSource::new([Ok(vec![
        vanished,
        ProcessSample::new(8u32, "/bin/bar", ProcessStatus::Sleeping),
    ])]);
    let mut engine = engine(source, clock, vec![Box::new(recorder.clone())]);

    let report = engine.tick().await.unwrap();

    assert_eq!(report.sink_failures, 0);
    let published = recorder.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].len(), 2);
    assert_eq!(published[0][0].exe, "");
    assert!(!published[0][0].active);
    assert_eq!(published[0][1].exe, "/bin/bar");
    assert!(published[0][1].active);
}

#[tokio::test]
async fn failing_sink_does_not_block_others() {
    let dir = tempdir().unwrap();
    let recorder = Recorder::default();
    let clock = ManualClock::new(usize::MAX, CancellationToken::new());
    let source = ScriptedSource::new([foo_running(), foo_running()]);
    let unwritable = dir.path().join("missing").join("process_info.json");
    let mut engine = engine(
        source,
        clock.clone(),
        vec![
            Box::new(Broken),
            Box::new(JsonFileSink::new(&unwritable)),
            Box::new(recorder.clone()),
        ],
    );

    let first = engine.tick().await.unwrap();
    assert_eq!(first.sink_failures, 2);
    assert!(!unwritable.exists());

    clock.advance(SAMPLE_INTERVAL);
    let second = engine.tick().await.unwrap();
    assert_eq!(second.sink_failures, 2);
    assert_eq!(recorder.published().len(), 2);
    assert_eq!(second.reports[0].total_time, Duration::from_secs(10));
}

#[tokio::test]
async fn run_until_ticks_each_interval_until_cancelled() {
    let cancel = CancellationToken::new();
    let clock = ManualClock::new(3, cancel.clone());
    let start = clock.now();
    let recorder = Recorder::default();
    let source = ScriptedSource::new([foo_running(), foo_running(), foo_running()]);
    let mut engine = engine(source, clock.clone(), vec![Box::new(recorder.clone())]);

    engine.run_until(cancel).await;

    let published = recorder.published();
    assert_eq!(published.len(), 3);
    assert_eq!(engine.tracker().ticks(), 3);
    assert_eq!(clock.now() - start, SAMPLE_INTERVAL * 3);
    assert_eq!(published[2][0].total_time, Duration::from_secs(30));
}

#[tokio::test]
async fn run_until_survives_source_failures() {
    let cancel = CancellationToken::new();
    let clock = ManualClock::new(3, cancel.clone());
    let recorder = Recorder::default();
    let source = ScriptedSource::new([
        Err(SourceError::Unavailable("busy".into())),
        foo_running(),
        Err(SourceError::Unavailable("busy".into())),
    ]);
    let mut engine = engine(source, clock, vec![Box::new(recorder.clone())]);

    engine.run_until(cancel).await;

    assert_eq!(recorder.published().len(), 1);
    assert_eq!(engine.tracker().ticks(), 1);
}

#[tokio::test]
async fn run_until_returns_immediately_when_already_cancelled() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let clock = ManualClock::new(usize::MAX, cancel.clone());
    let recorder = Recorder::default();
    let mut engine = engine(
        ScriptedSource::new([foo_running()]),
        clock,
        vec![Box::new(recorder.clone())],
    );

    engine.run_until(cancel).await;

    assert!(recorder.published().is_empty());
    assert!(engine.tracker().is_empty());
}
