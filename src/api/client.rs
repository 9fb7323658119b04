//! Remote data gateway.
//!
//! All outbound calls to the message board go through [`BoardGateway`]. The
//! trait exists so the event loop can hold an `Arc<dyn BoardGateway>` and
//! tests can substitute a stub without a network.
//!
//! Every call is attempted exactly once: no retries, no timeouts, no
//! cancellation. Responses are not checked for HTTP status. A non-JSON body
//! is a parse failure, anything parseable goes through.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{Message, NewMessage, PostOutcome, PostReceipt};

/// Author attached to every created entry.
///
/// The board predates accounts; every client posts under one fixed name.
/// Pinned by `create_always_sends_default_nickname` in the integration tests
/// so it cannot be made configurable by accident.
pub const DEFAULT_NICKNAME: &str = "corkboard";

/// Errors from a gateway call.
#[derive(Debug)]
pub enum BoardApiError {
    /// Request never completed (DNS, refused connection, dropped socket).
    Network(String),
    /// Response body was not the JSON shape we expect.
    Parse(String),
}

impl fmt::Display for BoardApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardApiError::Network(msg) => write!(f, "network error: {msg}"),
            BoardApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BoardApiError {}

#[async_trait]
pub trait BoardGateway: Send + Sync {
    /// Fetch all entries, newest first (server-side sort).
    async fn list(&self) -> Result<Vec<Message>, BoardApiError>;

    /// Create an entry with the given body under [`DEFAULT_NICKNAME`].
    ///
    /// An application-level rejection (`ok: 0` payload) is an `Ok` with
    /// [`PostOutcome::Rejected`] — the call itself succeeded.
    async fn create(&self, body: &str) -> Result<PostOutcome, BoardApiError>;

    /// Delete the entry with the given id.
    async fn delete(&self, id: i64) -> Result<(), BoardApiError>;
}

/// Gateway backed by the json-server REST API.
pub struct JsonApiGateway {
    base_url: String,
    client: reqwest::Client,
}

impl JsonApiGateway {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn comments_url(&self) -> String {
        format!("{}/comments", self.base_url)
    }
}

#[async_trait]
impl BoardGateway for JsonApiGateway {
    async fn list(&self) -> Result<Vec<Message>, BoardApiError> {
        debug!("GET {}", self.comments_url());

        let response = self
            .client
            .get(self.comments_url())
            .query(&[("_sort", "createdAt"), ("_order", "desc")])
            .send()
            .await
            .map_err(|e| BoardApiError::Network(e.to_string()))?;

        let messages: Vec<Message> = response
            .json()
            .await
            .map_err(|e| BoardApiError::Parse(e.to_string()))?;

        info!("Fetched {} messages", messages.len());
        Ok(messages)
    }

    async fn create(&self, body: &str) -> Result<PostOutcome, BoardApiError> {
        debug!("POST {} ({} bytes)", self.comments_url(), body.len());

        let payload = NewMessage {
            nickname: DEFAULT_NICKNAME,
            body,
        };

        let response = self
            .client
            .post(self.comments_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| BoardApiError::Network(e.to_string()))?;

        let receipt: PostReceipt = response
            .json()
            .await
            .map_err(|e| BoardApiError::Parse(e.to_string()))?;

        let outcome = receipt.into_outcome();
        match &outcome {
            PostOutcome::Accepted => info!("Message accepted"),
            PostOutcome::Rejected(reason) => warn!("Message rejected: {}", reason),
        }
        Ok(outcome)
    }

    async fn delete(&self, id: i64) -> Result<(), BoardApiError> {
        let url = format!("{}/{}", self.comments_url(), id);
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| BoardApiError::Network(e.to_string()))?;

        // The body is unused beyond being valid JSON (the success signal).
        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| BoardApiError::Parse(e.to_string()))?;

        info!("Deleted message {}", id);
        Ok(())
    }
}
