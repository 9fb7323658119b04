//! # Actions
//!
//! Everything that can happen in the client becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The fetch task resolves? That's `Action::MessagesLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any side effect the caller must
//! perform. No I/O happens here. The event loop spawns the network calls.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: feed actions, assert on state and effects.

use log::{debug, info, warn};

use crate::api::Message;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Request a fresh list fetch (startup, Ctrl+R, post-create refresh).
    Refresh,
    /// A list fetch resolved. `seq` is the generation stamped at spawn time.
    MessagesLoaded { seq: u64, messages: Vec<Message> },
    /// A list fetch failed.
    FetchFailed { seq: u64, error: String },
    /// The compose buffer changed.
    DraftChanged(String),
    /// Focus moved into the compose box. Clears the previous submit error,
    /// matching the "start typing again dismisses the error" rule.
    DraftFocused,
    /// Submit the current draft.
    Submit,
    /// The create call completed and the server took the entry.
    PostAccepted,
    /// The create call failed: transport error or server rejection.
    PostRejected(String),
    /// Ask the server to delete an entry.
    DeleteMessage(i64),
    /// The server confirmed a delete.
    MessageDeleted(i64),
    /// A delete failed. Logged and swallowed; there is deliberately no
    /// user-visible error path for deletes, unlike creates.
    DeleteFailed { id: i64, error: String },
    Quit,
}

/// Side effects the event loop must perform after a reducer step.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Spawn a list fetch stamped with this generation.
    SpawnFetch(u64),
    /// Spawn a create call with this body.
    SpawnPost(String),
    /// Spawn a delete call for this id.
    SpawnDelete(i64),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Refresh => {
            app.fetch_seq += 1;
            debug!("Refresh requested (seq={})", app.fetch_seq);
            Effect::SpawnFetch(app.fetch_seq)
        }

        Action::MessagesLoaded { seq, messages } => {
            if seq != app.fetch_seq {
                debug!(
                    "Discarding stale fetch result (seq={}, current={})",
                    seq, app.fetch_seq
                );
                return Effect::None;
            }
            app.status_message = match messages.len() {
                1 => String::from("1 message"),
                n => format!("{} messages", n),
            };
            app.messages = Some(messages);
            app.fetch_error = None;
            Effect::None
        }

        Action::FetchFailed { seq, error } => {
            if seq != app.fetch_seq {
                debug!(
                    "Discarding stale fetch error (seq={}, current={})",
                    seq, app.fetch_seq
                );
                return Effect::None;
            }
            warn!("Fetch failed: {}", error);
            app.fetch_error = Some(error);
            Effect::None
        }

        Action::DraftChanged(text) => {
            app.draft = text;
            Effect::None
        }

        Action::DraftFocused => {
            app.post_error = None;
            Effect::None
        }

        Action::Submit => {
            if app.is_posting {
                // A create is already in flight: silently drop, don't queue.
                debug!("Submit ignored: post already in flight");
                return Effect::None;
            }
            app.is_posting = true;
            app.status_message = String::from("Posting…");
            Effect::SpawnPost(app.draft.clone())
        }

        Action::PostAccepted => {
            info!("Post accepted, refreshing list");
            app.is_posting = false;
            app.draft.clear();
            app.status_message = String::from("Message posted");
            app.fetch_seq += 1;
            Effect::SpawnFetch(app.fetch_seq)
        }

        Action::PostRejected(reason) => {
            warn!("Post rejected: {}", reason);
            app.is_posting = false;
            app.post_error = Some(reason);
            app.status_message = String::from("Post failed");
            Effect::None
        }

        Action::DeleteMessage(id) => {
            debug!("Delete requested for message {}", id);
            Effect::SpawnDelete(id)
        }

        Action::MessageDeleted(id) => {
            if let Some(messages) = app.messages.as_mut() {
                messages.retain(|m| m.id != id);
                app.status_message = format!("Deleted message {}", id);
            }
            Effect::None
        }

        Action::DeleteFailed { id, error } => {
            // Swallowed: the list stays as-is and nothing is surfaced.
            warn!("Delete of message {} failed: {}", id, error);
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_message, test_app};

    fn loaded_app(ids: &[i64]) -> App {
        let mut app = test_app();
        app.fetch_seq = 1;
        let messages = ids.iter().map(|&id| sample_message(id)).collect();
        let effect = update(
            &mut app,
            Action::MessagesLoaded { seq: 1, messages },
        );
        assert_eq!(effect, Effect::None);
        app
    }

    #[test]
    fn refresh_bumps_sequence_and_spawns_fetch() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Refresh), Effect::SpawnFetch(1));
        assert_eq!(update(&mut app, Action::Refresh), Effect::SpawnFetch(2));
    }

    #[test]
    fn messages_loaded_replaces_list_in_server_order() {
        let app = loaded_app(&[3, 1, 2]);
        let ids: Vec<i64> = app
            .messages
            .as_ref()
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn messages_loaded_clears_previous_fetch_error() {
        let mut app = test_app();
        app.fetch_seq = 1;
        update(
            &mut app,
            Action::FetchFailed {
                seq: 1,
                error: "network error: down".to_string(),
            },
        );
        assert!(app.fetch_error.is_some());

        app.fetch_seq = 2;
        update(
            &mut app,
            Action::MessagesLoaded {
                seq: 2,
                messages: vec![],
            },
        );
        assert!(app.fetch_error.is_none());
    }

    #[test]
    fn fetch_failure_sets_error_and_keeps_list() {
        let mut app = loaded_app(&[1, 2]);
        app.fetch_seq = 2;
        update(
            &mut app,
            Action::FetchFailed {
                seq: 2,
                error: "network error: unreachable".to_string(),
            },
        );
        assert_eq!(
            app.fetch_error.as_deref(),
            Some("network error: unreachable")
        );
        // The previously loaded list is not thrown away.
        assert_eq!(app.messages.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn stale_fetch_result_is_discarded() {
        // A fetch from generation 1 resolves after generation 2 was issued.
        let mut app = loaded_app(&[1, 2, 3]);
        app.fetch_seq = 2;
        let effect = update(
            &mut app,
            Action::MessagesLoaded {
                seq: 1,
                messages: vec![sample_message(99)],
            },
        );
        assert_eq!(effect, Effect::None);
        let ids: Vec<i64> = app
            .messages
            .as_ref()
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn stale_fetch_error_is_discarded() {
        let mut app = loaded_app(&[1]);
        app.fetch_seq = 5;
        update(
            &mut app,
            Action::FetchFailed {
                seq: 3,
                error: "too late".to_string(),
            },
        );
        assert!(app.fetch_error.is_none());
    }

    #[test]
    fn submit_spawns_post_with_current_draft() {
        let mut app = test_app();
        app.draft = "hello board".to_string();
        let effect = update(&mut app, Action::Submit);
        assert_eq!(effect, Effect::SpawnPost("hello board".to_string()));
        assert!(app.is_posting);
    }

    #[test]
    fn submit_while_posting_is_a_silent_no_op() {
        let mut app = test_app();
        app.draft = "first".to_string();
        assert_eq!(
            update(&mut app, Action::Submit),
            Effect::SpawnPost("first".to_string())
        );
        // Second submit while the first is in flight: no second network call.
        assert_eq!(update(&mut app, Action::Submit), Effect::None);
        assert!(app.is_posting);
    }

    #[test]
    fn post_accepted_clears_draft_and_refetches_once() {
        let mut app = test_app();
        app.draft = "hello".to_string();
        app.fetch_seq = 1;
        update(&mut app, Action::Submit);

        let effect = update(&mut app, Action::PostAccepted);
        assert_eq!(effect, Effect::SpawnFetch(2));
        assert!(app.draft.is_empty());
        assert!(!app.is_posting);
    }

    #[test]
    fn post_rejected_keeps_draft_and_sets_error() {
        let mut app = test_app();
        app.draft = "hi".to_string();
        update(&mut app, Action::Submit);

        let effect = update(&mut app, Action::PostRejected("too short".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.post_error.as_deref(), Some("too short"));
        assert_eq!(app.draft, "hi");
        assert!(!app.is_posting);
    }

    #[test]
    fn post_accepted_does_not_clear_a_lingering_post_error() {
        // Only re-focusing the input clears the error; a later success
        // leaves it in place.
        let mut app = test_app();
        app.post_error = Some("too short".to_string());
        update(&mut app, Action::Submit);
        update(&mut app, Action::PostAccepted);
        assert_eq!(app.post_error.as_deref(), Some("too short"));
    }

    #[test]
    fn draft_focus_clears_post_error() {
        let mut app = test_app();
        app.post_error = Some("too short".to_string());
        update(&mut app, Action::DraftFocused);
        assert!(app.post_error.is_none());
    }

    #[test]
    fn draft_focus_leaves_fetch_error_alone() {
        let mut app = test_app();
        app.fetch_error = Some("network error: down".to_string());
        app.post_error = Some("too short".to_string());
        update(&mut app, Action::DraftFocused);
        assert!(app.post_error.is_none());
        assert!(app.fetch_error.is_some());
    }

    #[test]
    fn delete_request_spawns_delete_without_touching_state() {
        let mut app = loaded_app(&[41, 42, 43]);
        let effect = update(&mut app, Action::DeleteMessage(42));
        assert_eq!(effect, Effect::SpawnDelete(42));
        assert_eq!(app.messages.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn confirmed_delete_removes_exactly_that_entry() {
        let mut app = loaded_app(&[41, 42, 43]);
        update(&mut app, Action::MessageDeleted(42));
        let ids: Vec<i64> = app
            .messages
            .as_ref()
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![41, 43]);
    }

    #[test]
    fn delete_failure_is_swallowed() {
        // Unlike creates, delete failures surface nothing: the list is
        // unchanged and no error slot is filled.
        let mut app = loaded_app(&[41, 42]);
        let effect = update(
            &mut app,
            Action::DeleteFailed {
                id: 42,
                error: "network error: gone".to_string(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.messages.as_ref().unwrap().len(), 2);
        assert!(app.fetch_error.is_none());
        assert!(app.post_error.is_none());
    }

    #[test]
    fn quit_yields_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
