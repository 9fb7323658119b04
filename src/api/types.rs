//! Wire types for the message-board API.
//!
//! The remote service is a json-server style REST resource: entries are
//! returned in camelCase, timestamps as ISO-8601 strings. Everything here is
//! the shape of the wire, not application policy. Outcome classification
//! lives in [`PostOutcome`], which the gateway derives from [`PostReceipt`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One board entry, as returned by `GET /comments`.
///
/// Server-owned: the id is assigned on create and entries are never edited.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub id: i64,
    pub nickname: String,
    pub body: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /comments`.
#[derive(Debug, Serialize)]
pub struct NewMessage<'a> {
    pub nickname: &'a str,
    pub body: &'a str,
}

/// Raw response payload of `POST /comments`.
///
/// On rejection the server answers HTTP 200 with `{"ok": 0, "message": ...}`.
/// On success it echoes the created entry, which carries no `ok` field at
/// all, so only an explicit `ok: 0` counts as a rejection.
#[derive(Debug, Deserialize)]
pub struct PostReceipt {
    #[serde(default)]
    pub ok: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Application-level outcome of a create call.
///
/// Distinct from transport failure: a `Rejected` response completed over the
/// wire just fine, the server merely refused the entry.
#[derive(Debug, Clone, PartialEq)]
pub enum PostOutcome {
    Accepted,
    Rejected(String),
}

impl PostReceipt {
    /// Collapse the raw payload into an outcome.
    pub fn into_outcome(self) -> PostOutcome {
        if self.ok == Some(0) {
            let reason = self
                .message
                .unwrap_or_else(|| "message rejected by server".to_string());
            PostOutcome::Rejected(reason)
        } else {
            PostOutcome::Accepted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn message_parses_camel_case_wire_shape() {
        let json = r#"{
            "id": 42,
            "nickname": "ada",
            "body": "hello board",
            "createdAt": "2021-06-01T12:30:00.000Z"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, 42);
        assert_eq!(msg.nickname, "ada");
        assert_eq!(msg.body, "hello board");
        assert_eq!(
            msg.created_at,
            Utc.with_ymd_and_hms(2021, 6, 1, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn message_list_preserves_server_order() {
        let json = r#"[
            {"id": 3, "nickname": "a", "body": "newest", "createdAt": "2021-06-03T00:00:00Z"},
            {"id": 1, "nickname": "b", "body": "oldest", "createdAt": "2021-06-01T00:00:00Z"}
        ]"#;
        let msgs: Vec<Message> = serde_json::from_str(json).unwrap();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].id, 3);
        assert_eq!(msgs[1].id, 1);
    }

    #[test]
    fn receipt_with_ok_zero_is_rejected_with_server_message() {
        let receipt: PostReceipt =
            serde_json::from_str(r#"{"ok": 0, "message": "too short"}"#).unwrap();
        assert_eq!(
            receipt.into_outcome(),
            PostOutcome::Rejected("too short".to_string())
        );
    }

    #[test]
    fn receipt_with_ok_zero_and_no_message_gets_fallback_reason() {
        let receipt: PostReceipt = serde_json::from_str(r#"{"ok": 0}"#).unwrap();
        match receipt.into_outcome() {
            PostOutcome::Rejected(reason) => assert!(!reason.is_empty()),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn created_entity_echo_without_ok_field_is_accepted() {
        // Success responses echo the created entry — no `ok` field at all.
        let receipt: PostReceipt = serde_json::from_str(
            r#"{"id": 7, "nickname": "ada", "body": "hi", "createdAt": "2021-06-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(receipt.into_outcome(), PostOutcome::Accepted);
    }

    #[test]
    fn receipt_with_ok_one_is_accepted() {
        let receipt: PostReceipt = serde_json::from_str(r#"{"ok": 1}"#).unwrap();
        assert_eq!(receipt.into_outcome(), PostOutcome::Accepted);
    }

    #[test]
    fn new_message_serializes_expected_payload() {
        let payload = NewMessage {
            nickname: "ada",
            body: "hello",
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"nickname": "ada", "body": "hello"})
        );
    }
}
