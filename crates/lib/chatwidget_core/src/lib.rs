//! # chatwidget_core
//!
//! Chat input handler for a single-page chat widget.
//!
//! A submission reads the input field, exchanges the message with the chat
//! endpoint (`POST /chat`), then appends a user entry and a bot entry to the
//! chat log. Hosts (terminal, browser) supply the element handles through the
//! traits in [`view`] and the network through [`transport::ChatTransport`].

pub mod config;
pub mod entry;
pub mod exchange;
pub mod handler;
pub mod transport;
pub mod view;

pub use config::{HandlerConfig, WidgetConfig};
pub use entry::{ChatEntry, MessageExchange, Role};
pub use exchange::{ExchangeOutcome, TransportError};
pub use handler::{ChatInputHandler, SubmitError};
pub use transport::{ChatTransport, HttpTransport};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
