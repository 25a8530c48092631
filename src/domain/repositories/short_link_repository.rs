//! Repository trait for the short-code registry store.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Durable mapping of short code to destination URL.
///
/// Implementations are the single shared resource of the service, so every
/// method must be safe to call from any number of concurrent tasks.
///
/// # Guarantees required from implementations
///
/// - `insert` enforces `short_code` uniqueness itself (unique index or an
///   equivalent atomic check); callers' pre-checks are advisory only.
/// - `increment_usage` is a single atomic "add one and return" step. A
///   read-then-write pair performed by the caller is never acceptable.
/// - Lookups by code and by id are indexed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryShortLinkRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Atomically creates a short link with `usage_count = 0` and `created_at = now`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if the code is already taken; in
    /// that case nothing is written.
    /// Returns [`StoreError::Unavailable`] on storage failures.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Finds a link by its exact (case-sensitive) short code.
    async fn lookup_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Finds a link by its surrogate id.
    async fn lookup_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError>;

    /// Finds a link whose `long_url` is byte-for-byte equal to `long_url`.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Adds one to the usage counter and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id does not exist (for example,
    /// the link was deleted between lookup and increment).
    async fn increment_usage(&self, id: i64) -> Result<i64, StoreError>;

    /// Permanently removes a link and returns the removed row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id does not exist.
    async fn delete(&self, id: i64) -> Result<ShortLink, StoreError>;

    /// Lists one page of links, newest first.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of items per page
    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<ShortLink>, StoreError>;

    /// Counts all live links.
    async fn count(&self) -> Result<i64, StoreError>;
}
