//! Month → link registry.
//!
//! The store is reached through [`LinkRepository`] so the flat-file backend can
//! be swapped without touching the router or the classifier.

mod file;

use async_trait::async_trait;

use crate::{domain::FullMonthName, Result};

pub use file::FileLinkRepository;

#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Insert or replace the link for the month that `month_input` prefixes.
    ///
    /// Fails with `UnrecognizedMonth` when no genitive month starts with the input.
    async fn upsert(&self, month_input: &str, link: &str) -> Result<FullMonthName>;

    /// Link of the first record whose month shares the token's three-letter prefix.
    ///
    /// A missing store is not an error.
    async fn lookup_by_month_prefix(&self, month_token: &str) -> Result<Option<String>>;

    /// Raw persisted content. Fails with `FileNotFound` before the first write.
    async fn dump_all(&self) -> Result<String>;
}
