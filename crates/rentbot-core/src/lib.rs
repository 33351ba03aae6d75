//! Core logic for the rental-host assistant bot.
//!
//! This crate is framework-agnostic: the month-link registry, guest message
//! classification, and admin command routing. Telegram lives behind the
//! messaging port implemented in the adapter crate.

pub mod classifier;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod months;
pub mod registry;
pub mod router;
pub mod security;
pub mod templates;

pub use errors::{Error, Result};
