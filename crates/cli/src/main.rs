use config::Config;
use flume::bounded;
use proctally::signals::Signals;
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracker::{Engine, Services};

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Config::new();
    debug!(?config);

    let signals = Signals::install()?;
    let (events_tx, events_rx) = bounded(8);
    tokio::spawn(async move {
        if let Err(err) = signals.forward(events_tx).await {
            debug!(%err, "signal forwarding stopped");
        }
    });

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if let Ok(event) = events_rx.recv_async().await {
                info!(?event, "Received signal event");
            }
            cancel.cancel();
        }
    });

    let mut engine = Engine::new(config.clone(), Services::system(&config));
    engine.run_until(cancel).await;

    writeln!(std::io::stdout().lock(), "Exiting...")?;
    Ok(())
}
