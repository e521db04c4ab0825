//! Network side of an exchange.
//!
//! [`ChatTransport`] is the seam between the handler and the network so hosts
//! and tests can substitute their own. [`HttpTransport`] is the `reqwest`
//! implementation used by the terminal and browser hosts.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::exchange::{ChatRequest, RawReply, TransportError};

/// Sends one chat message and returns the undecoded reply.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChatTransport {
    async fn post_message(&self, message: &str) -> Result<RawReply, TransportError>;
}

/// `POST`s `{"message": ...}` as JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatTransport for HttpTransport {
    async fn post_message(&self, message: &str) -> Result<RawReply, TransportError> {
        debug!("POST {} ({} chars)", self.endpoint, message.chars().count());

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Request(format!("reading body: {e}")))?;

        debug!("{} answered {status}", self.endpoint);
        Ok(RawReply { status, body })
    }
}
