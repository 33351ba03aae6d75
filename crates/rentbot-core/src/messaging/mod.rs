//! Messenger abstractions. Telegram lives in the adapter crate.

pub mod port;
pub mod types;
