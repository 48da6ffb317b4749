//! Health Q&A Chat
//!
//! Conversation state for the chat assistant. Each [`ChatSession`] is owned
//! by exactly one view (a CLI loop or an API session entry) and sends one
//! request at a time.

mod message;
mod session;

pub use message::{ChatMessage, GroundingSource, Sender};
pub use session::{ChatError, ChatSession};
