//! Resolution of inbound paths to redirect targets.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::errors::StoreError;
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::cache::{CacheService, CachedLink};
use crate::utils::code_generator::is_well_formed_code;

/// A successful resolution: where to send the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub link_id: i64,
    pub short_code: String,
    pub long_url: String,
    /// Counter value after this visit was recorded.
    pub usage_count: i64,
}

/// Turns an unmatched request path into a redirect, counting the visit.
///
/// # Algorithm
///
/// 1. Strip leading and trailing `/`; an empty or malformed code is a miss
///    and never reaches the store
/// 2. Look the code up (redirect cache first, then the store)
/// 3. On a hit, atomically increment the usage counter and return the target
///
/// A miss is `Ok(None)`: "not mine", the caller falls through to its normal
/// 404 handling. Only storage failures are errors.
pub struct RedirectResolver<R: ShortLinkRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: ShortLinkRepository + ?Sized> RedirectResolver<R> {
    /// Creates a resolver over the given store and redirect cache.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Resolves `path` to its destination, recording one usage on a hit.
    ///
    /// The increment fires whether or not the client follows the redirect.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store fails. Unknown codes
    /// are never an error.
    pub async fn resolve(&self, path: &str) -> Result<Option<RedirectTarget>, StoreError> {
        let code = path.trim_matches('/');

        if !is_well_formed_code(code) {
            record_redirect("miss");
            return Ok(None);
        }

        if let Some(target) = self.resolve_cached(code).await? {
            record_redirect("hit");
            return Ok(Some(target));
        }

        let Some(link) = self.repository.lookup_by_code(code).await? else {
            debug!(short_code = code, "No short link for path");
            record_redirect("miss");
            return Ok(None);
        };

        self.spawn_cache_fill(
            code,
            CachedLink {
                id: link.id,
                long_url: link.long_url.clone(),
            },
        );

        match self.repository.increment_usage(link.id).await {
            Ok(usage_count) => {
                record_redirect("hit");
                Ok(Some(RedirectTarget {
                    link_id: link.id,
                    short_code: link.short_code,
                    long_url: link.long_url,
                    usage_count,
                }))
            }
            // Deleted between lookup and increment.
            Err(StoreError::NotFound) => {
                self.invalidate(code).await;
                record_redirect("miss");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn resolve_cached(&self, code: &str) -> Result<Option<RedirectTarget>, StoreError> {
        let cached = match self.cache.get_link(code).await {
            Ok(Some(cached)) => cached,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = %e, short_code = code, "Cache lookup failed, using store");
                return Ok(None);
            }
        };

        match self.repository.increment_usage(cached.id).await {
            Ok(usage_count) => Ok(Some(RedirectTarget {
                link_id: cached.id,
                short_code: code.to_string(),
                long_url: cached.long_url,
                usage_count,
            })),
            Err(StoreError::NotFound) => {
                debug!(short_code = code, "Cached link no longer exists");
                self.invalidate(code).await;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn spawn_cache_fill(&self, code: &str, entry: CachedLink) {
        let cache = self.cache.clone();
        let code = code.to_string();

        tokio::spawn(async move {
            if let Err(e) = cache.set_link(&code, &entry, None).await {
                warn!(error = %e, short_code = %code, "Failed to cache short link");
            }
        });
    }

    async fn invalidate(&self, code: &str) {
        if let Err(e) = self.cache.invalidate(code).await {
            warn!(error = %e, short_code = code, "Failed to invalidate cache entry");
        }
    }
}

fn record_redirect(outcome: &'static str) {
    metrics::counter!("shortlink_redirects_total", "outcome" => outcome).increment(1);
}
