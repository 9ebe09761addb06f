//! Chat domain state: conversations, sidebar derivation, prompt shortcuts.

pub mod filter;
pub mod prompts;
pub mod store;

pub use store::{ChatStore, Conversation, Message, MessageRole};
