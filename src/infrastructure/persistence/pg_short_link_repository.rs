//! PostgreSQL implementation of the registry store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::ShortLinkRepository;
use crate::utils::db_error::map_store_error;

/// Raw `short_links` row.
#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    long_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    usage_count: i64,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(r: ShortLinkRow) -> Self {
        ShortLink::new(r.id, r.long_url, r.short_code, r.created_at, r.usage_count)
    }
}

/// PostgreSQL repository for the short-code registry.
///
/// Uniqueness of `short_code` is enforced by the `short_links_short_code_key`
/// constraint and the usage counter is bumped by a single `UPDATE … RETURNING`,
/// so concurrent callers never lose updates.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (long_url, short_code)
            VALUES ($1, $2)
            RETURNING id, long_url, short_code, created_at, usage_count
            "#,
        )
        .bind(&new_link.long_url)
        .bind(&new_link.short_code)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_store_error)?;

        Ok(row.into())
    }

    async fn lookup_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, long_url, short_code, created_at, usage_count
            FROM short_links
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_store_error)?;

        Ok(row.map(ShortLink::from))
    }

    async fn lookup_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, long_url, short_code, created_at, usage_count
            FROM short_links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_store_error)?;

        Ok(row.map(ShortLink::from))
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, long_url, short_code, created_at, usage_count
            FROM short_links
            WHERE long_url = $1
            LIMIT 1
            "#,
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_store_error)?;

        Ok(row.map(ShortLink::from))
    }

    async fn increment_usage(&self, id: i64) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE short_links
            SET usage_count = usage_count + 1
            WHERE id = $1
            RETURNING usage_count
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_store_error)?;

        count.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<ShortLink, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            DELETE FROM short_links
            WHERE id = $1
            RETURNING id, long_url, short_code, created_at, usage_count
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_store_error)?;

        row.map(ShortLink::from).ok_or(StoreError::NotFound)
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<ShortLink>, StoreError> {
        let offset = (page.max(1) - 1).saturating_mul(page_size);

        let rows = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, long_url, short_code, created_at, usage_count
            FROM short_links
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_store_error)?;

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_store_error)
    }
}
