use crate::signals::SignalEvent;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The runtime refused to register a shutdown handler; `signal` names it.
    #[error("cannot listen for {signal} shutdown requests: {source}")]
    SignalHandler {
        signal: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("shutdown listener dropped before {0} was delivered")]
    SendSignal(SignalEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_signal() {
        let err = Error::SignalHandler {
            signal: "SIGTERM",
            source: io::Error::other("no signal driver"),
        };
        assert_eq!(
            err.to_string(),
            "cannot listen for SIGTERM shutdown requests: no signal driver"
        );

        let err = Error::SendSignal(SignalEvent::Interrupt);
        assert_eq!(
            err.to_string(),
            "shutdown listener dropped before SIGINT was delivered"
        );
    }
}
