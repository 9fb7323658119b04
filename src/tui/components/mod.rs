//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Two patterns, following the split between props and state:
//!
//! - **Stateless (props-based)**: `TitleBar` and `MessageCard` are created
//!   fresh each frame with the data they render.
//! - **Stateful (event-driven)**: `ComposeBox` owns the draft buffer and
//!   cursor; `MessageListState` owns scroll offset and selection. Both emit
//!   high-level events via the `EventHandler` trait.
//!
//! Components receive external data as props rather than reading global
//! state, which keeps dependencies explicit and the components testable
//! with a `TestBackend`.

pub mod compose_box;
pub mod message;
pub mod message_list;
pub mod title_bar;

pub use compose_box::{ComposeBox, ComposeEvent};
pub use message::MessageCard;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
