pub mod client;
pub mod types;

pub use client::{BoardApiError, BoardGateway, JsonApiGateway, DEFAULT_NICKNAME};
pub use types::{Message, NewMessage, PostOutcome, PostReceipt};
