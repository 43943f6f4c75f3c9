use crate::error::Error;
use flume::Sender;
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Shutdown signal handlers, registered before the sampling loop starts so
/// that a failed registration is reported at startup.
#[derive(Debug)]
pub struct Signals {
    sigint: Signal,
    sigterm: Signal,
}

impl Signals {
    pub fn install() -> Result<Self, Error> {
        Ok(Self {
            sigint: register(SignalKind::interrupt(), SignalEvent::Interrupt)?,
            sigterm: register(SignalKind::terminate(), SignalEvent::Terminate)?,
        })
    }

    /// Indefinitely listens to signals and sends signal events to the provided
    /// channel. Returns once the receiving side is gone.
    pub async fn forward(mut self, signal_event: Sender<SignalEvent>) -> Result<(), Error> {
        loop {
            let event = tokio::select! {
                _ = self.sigint.recv() => SignalEvent::Interrupt,
                _ = self.sigterm.recv() => SignalEvent::Terminate,
            };
            signal_event
                .send_async(event)
                .await
                .map_err(|err| Error::SendSignal(err.into_inner()))?;
        }
    }
}

fn register(kind: SignalKind, event: SignalEvent) -> Result<Signal, Error> {
    signal(kind).map_err(|source| Error::SignalHandler {
        signal: event.name(),
        source,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    Interrupt,
    Terminate,
}

impl SignalEvent {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

impl std::fmt::Display for SignalEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
