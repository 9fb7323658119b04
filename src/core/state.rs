//! # Application State
//!
//! Core business state for the board client. This module contains domain
//! data only - no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! App
//! ├── gateway: Arc<dyn BoardGateway>   // remote board API
//! ├── board_host: String               // display name of the board
//! ├── messages: Option<Vec<Message>>   // None until the first fetch lands
//! ├── draft: String                    // uncommitted compose text
//! ├── fetch_error: Option<String>      // last list-fetch failure
//! ├── post_error: Option<String>       // last submit failure
//! ├── is_posting: bool                 // create request in flight
//! ├── fetch_seq: u64                   // monotonic fetch generation
//! └── status_message: String           // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::api::{BoardGateway, Message};

pub struct App {
    pub gateway: Arc<dyn BoardGateway>,
    /// Host shown in the title bar (base URL without the scheme).
    pub board_host: String,
    /// `None` until the first fetch completes; `Some(vec![])` is a loaded,
    /// empty board (renders the "no messages" indicator).
    pub messages: Option<Vec<Message>>,
    pub draft: String,
    pub fetch_error: Option<String>,
    pub post_error: Option<String>,
    /// True only while a create request is in flight. Gates duplicate submits.
    pub is_posting: bool,
    /// Generation counter for list fetches. Completions stamped with an older
    /// value are discarded, so a slow fetch can never clobber a newer one.
    pub fetch_seq: u64,
    pub status_message: String,
}

impl App {
    pub fn new(gateway: Arc<dyn BoardGateway>, board_host: String) -> Self {
        Self {
            gateway,
            board_host,
            messages: None,
            draft: String::new(),
            fetch_error: None,
            post_error: None,
            is_posting: false,
            fetch_seq: 0,
            status_message: String::from("Welcome to Corkboard!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Corkboard!");
        assert_eq!(app.board_host, "board.test");
        assert!(app.messages.is_none());
        assert!(app.draft.is_empty());
        assert!(app.fetch_error.is_none());
        assert!(app.post_error.is_none());
        assert!(!app.is_posting);
        assert_eq!(app.fetch_seq, 0);
    }
}
