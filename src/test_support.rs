//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::api::{BoardApiError, BoardGateway, Message, PostOutcome};

/// A no-op gateway for tests that don't need real network calls.
pub struct NoopGateway;

#[async_trait]
impl BoardGateway for NoopGateway {
    async fn list(&self) -> Result<Vec<Message>, BoardApiError> {
        Ok(Vec::new())
    }

    async fn create(&self, _body: &str) -> Result<PostOutcome, BoardApiError> {
        Ok(PostOutcome::Accepted)
    }

    async fn delete(&self, _id: i64) -> Result<(), BoardApiError> {
        Ok(())
    }
}

/// Creates a test App with a NoopGateway.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopGateway), "board.test".to_string())
}

/// A board entry with a deterministic timestamp, keyed by id.
pub fn sample_message(id: i64) -> Message {
    Message {
        id,
        nickname: format!("user{}", id),
        body: format!("message body {}", id),
        created_at: Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap(),
    }
}
