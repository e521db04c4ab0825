//! Chat input handler.
//!
//! One submission: read the input, validate, exchange with the endpoint,
//! append the user and bot entries, clear the input, scroll the log. The
//! handler keeps no state between submissions and is re-armed after each one,
//! whatever the outcome.

use log::{debug, error};
use thiserror::Error;

use crate::config::{EMPTY_INPUT_ALERT, HandlerConfig};
use crate::entry::MessageExchange;
use crate::exchange::{ExchangeOutcome, TransportError, response_text};
use crate::transport::ChatTransport;
use crate::view::{Alerter, ChatLog, InputField, ViewError};

/// Why a submission rendered nothing.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Empty message")]
    EmptyInput,

    #[error("Chat endpoint returned HTTP {0}")]
    Status(u16),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    View(#[from] ViewError),
}

/// Drives the chat form through injected element handles.
pub struct ChatInputHandler<T, I, L, A> {
    config: HandlerConfig,
    transport: T,
    input: I,
    log: L,
    alerter: A,
}

impl<T, I, L, A> ChatInputHandler<T, I, L, A>
where
    T: ChatTransport,
    I: InputField,
    L: ChatLog,
    A: Alerter,
{
    pub fn new(config: HandlerConfig, transport: T, input: I, log: L, alerter: A) -> Self {
        Self {
            config,
            transport,
            input,
            log,
            alerter,
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Handle one form submission.
    ///
    /// Overlapping calls run independently; whichever exchange finishes first
    /// renders first.
    pub async fn submit(&self) -> Result<MessageExchange, SubmitError> {
        let message = self.input.value();

        if self.config.validate_non_empty && message.trim().is_empty() {
            self.alerter.alert(EMPTY_INPUT_ALERT);
            return Err(SubmitError::EmptyInput);
        }

        let outcome = self.exchange(&message).await;
        self.render(message, outcome)
    }

    /// Send `message` and interpret the reply under this handler's config.
    pub async fn exchange(&self, message: &str) -> ExchangeOutcome {
        let result = self.transport.post_message(message).await;
        ExchangeOutcome::resolve(result, self.config.check_status)
    }

    fn render(
        &self,
        user_text: String,
        outcome: ExchangeOutcome,
    ) -> Result<MessageExchange, SubmitError> {
        let payload = match outcome {
            ExchangeOutcome::Success(payload) => payload,
            ExchangeOutcome::HttpError(status) => {
                error!("Failed to fetch response: {status}");
                return Err(SubmitError::Status(status));
            }
            ExchangeOutcome::TransportError(e) => {
                error!("Error sending request: {e}");
                return Err(e.into());
            }
        };

        let bot_text = response_text(&payload).unwrap_or_else(|| {
            debug!("Reply carried no response, using fallback text");
            self.config.fallback_text.clone()
        });

        let exchange = MessageExchange {
            user_text,
            bot_text,
        };
        self.log.append(&exchange.entries())?;
        self.input.clear()?;
        self.log.scroll_to_bottom()?;

        debug!(
            "Rendered exchange ({} chars in, {} chars out)",
            exchange.user_text.chars().count(),
            exchange.bot_text.chars().count()
        );
        Ok(exchange)
    }
}
