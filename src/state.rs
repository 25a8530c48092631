//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectResolver};
use crate::domain::repositories::{PathRegistry, ShortLinkRepository};
use crate::infrastructure::cache::CacheService;

/// Link service over type-erased store and path registry.
pub type DynLinkService = LinkService<dyn ShortLinkRepository, dyn PathRegistry>;

/// Redirect resolver over a type-erased store.
pub type DynRedirectResolver = RedirectResolver<dyn ShortLinkRepository>;

/// Application state. Cloning is cheap: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub resolver: Arc<DynRedirectResolver>,
    pub cache: Arc<dyn CacheService>,
    /// Public origin used to build `short_url`, without trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Wires services around one store, path registry and cache.
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        paths: Arc<dyn PathRegistry>,
        cache: Arc<dyn CacheService>,
        base_url: &str,
    ) -> Self {
        let link_service =
            LinkService::new(repository.clone(), paths).with_cache(cache.clone());
        let resolver = RedirectResolver::new(repository, cache.clone());

        Self {
            link_service: Arc::new(link_service),
            resolver: Arc::new(resolver),
            cache,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }
}
