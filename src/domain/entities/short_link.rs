//! ShortLink entity: a short code mapped to its destination URL.

use chrono::{DateTime, Utc};

/// A registered short code and its destination.
///
/// Every field except `usage_count` is fixed at creation. The counter only
/// moves forward, through [`crate::domain::repositories::ShortLinkRepository::increment_usage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub usage_count: i64,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        long_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        usage_count: i64,
    ) -> Self {
        Self {
            id,
            long_url,
            short_code,
            created_at,
            usage_count,
        }
    }

    /// Builds the public short URL under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.short_code)
    }
}

/// Input data for admitting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub long_url: String,
    pub short_code: String,
}
