//! In-process implementation of the registry store.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::ShortLinkRepository;

/// A stored row. Everything but the counter is immutable after insert.
struct Entry {
    link: ShortLink,
    usage_count: AtomicI64,
}

impl Entry {
    fn snapshot(&self) -> ShortLink {
        ShortLink {
            usage_count: self.usage_count.load(Ordering::Acquire),
            ..self.link.clone()
        }
    }
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    by_id: HashMap<i64, Arc<Entry>>,
    /// Unique index on `short_code`.
    by_code: HashMap<String, i64>,
}

/// Registry store kept entirely in memory.
///
/// Inserts and deletes take the write lock, so the uniqueness check and the
/// write are one atomic step. Increments only take the read lock and bump the
/// row's atomic counter, so redirects to different codes never serialize.
///
/// Data does not survive a restart; used by tests and by
/// `STORAGE_BACKEND=memory` deployments.
#[derive(Default)]
pub struct MemoryShortLinkRepository {
    tables: RwLock<Tables>,
}

impl MemoryShortLinkRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortLinkRepository for MemoryShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let mut tables = self.tables.write();

        if tables.by_code.contains_key(&new_link.short_code) {
            return Err(StoreError::DuplicateCode);
        }

        tables.next_id += 1;
        let id = tables.next_id;

        let link = ShortLink::new(id, new_link.long_url, new_link.short_code, Utc::now(), 0);
        tables.by_code.insert(link.short_code.clone(), id);
        tables.by_id.insert(
            id,
            Arc::new(Entry {
                link: link.clone(),
                usage_count: AtomicI64::new(0),
            }),
        );

        Ok(link)
    }

    async fn lookup_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, StoreError> {
        let tables = self.tables.read();

        Ok(tables
            .by_code
            .get(short_code)
            .and_then(|id| tables.by_id.get(id))
            .map(|entry| entry.snapshot()))
    }

    async fn lookup_by_id(&self, id: i64) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.tables.read().by_id.get(&id).map(|entry| entry.snapshot()))
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(self
            .tables
            .read()
            .by_id
            .values()
            .find(|entry| entry.link.long_url == long_url)
            .map(|entry| entry.snapshot()))
    }

    async fn increment_usage(&self, id: i64) -> Result<i64, StoreError> {
        let tables = self.tables.read();
        let entry = tables.by_id.get(&id).ok_or(StoreError::NotFound)?;

        Ok(entry.usage_count.fetch_add(1, Ordering::AcqRel) + 1)
    }

    async fn delete(&self, id: i64) -> Result<ShortLink, StoreError> {
        let mut tables = self.tables.write();
        let entry = tables.by_id.remove(&id).ok_or(StoreError::NotFound)?;
        tables.by_code.remove(&entry.link.short_code);

        Ok(entry.snapshot())
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<ShortLink>, StoreError> {
        let mut links: Vec<ShortLink> = self
            .tables
            .read()
            .by_id
            .values()
            .map(|entry| entry.snapshot())
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let page_size = page_size.max(0) as usize;
        let offset = ((page.max(1) - 1) as usize).saturating_mul(page_size);

        Ok(links.into_iter().skip(offset).take(page_size).collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().by_id.len() as i64)
    }
}
