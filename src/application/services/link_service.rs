//! Short link admission, deletion and listing.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::UniquenessValidator;
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::errors::{AdmissionError, StoreError, ValidationError};
use crate::domain::repositories::{PathRegistry, ShortLinkRepository};
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_long_url;

/// Attempts at generating a free code before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Largest page the listing entrypoint will return.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of the administrative listing.
#[derive(Debug, Clone)]
pub struct LinkPage {
    pub items: Vec<ShortLink>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

/// Service behind the administrative entrypoints.
///
/// Admission flows validator → code generator (only when no code was given)
/// → store insert. The store's unique index decides code collisions; a
/// generated code that collides is replaced and retried, a desired code that
/// collides is reported back.
pub struct LinkService<R: ShortLinkRepository + ?Sized, P: PathRegistry + ?Sized> {
    repository: Arc<R>,
    validator: UniquenessValidator<R, P>,
    cache: Option<Arc<dyn CacheService>>,
}

impl<R: ShortLinkRepository + ?Sized, P: PathRegistry + ?Sized> LinkService<R, P> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>, paths: Arc<P>) -> Self {
        Self {
            validator: UniquenessValidator::new(repository.clone(), paths),
            repository,
            cache: None,
        }
    }

    /// Invalidates redirect cache entries of deleted links.
    pub fn with_cache(mut self, cache: Arc<dyn CacheService>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Admits a new short link.
    ///
    /// An empty `desired_code` means "generate one". A non-empty code is
    /// validated exactly as given, without normalization. Surrounding
    /// whitespace is trimmed from `long_url` only.
    ///
    /// # Errors
    ///
    /// - [`AdmissionError::Validation`] for a malformed URL or code, a
    ///   duplicate long URL or a reserved code
    /// - [`AdmissionError::Store`] with [`StoreError::DuplicateCode`] when a
    ///   desired code is taken, or [`StoreError::Unavailable`]
    /// - [`AdmissionError::CodeSpaceExhausted`] when every generated code collided
    pub async fn create_short_link(
        &self,
        long_url: &str,
        desired_code: &str,
    ) -> Result<ShortLink, AdmissionError> {
        let long_url = long_url.trim();

        let result = match validate_long_url(long_url) {
            Err(e) => Err(e.into()),
            Ok(()) if desired_code.is_empty() => self.admit_generated(long_url).await,
            Ok(()) => self.admit_desired(long_url, desired_code).await,
        };

        record_admission(&result);

        let link = result?;
        info!(id = link.id, short_code = %link.short_code, "Short link created");
        Ok(link)
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this id.
    pub async fn get_short_link(&self, id: i64) -> Result<ShortLink, StoreError> {
        self.repository
            .lookup_by_id(id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Permanently deletes a link. The code becomes free for reuse at once.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this id.
    pub async fn delete_short_link(&self, id: i64) -> Result<ShortLink, StoreError> {
        let deleted = self.repository.delete(id).await?;

        if let Some(cache) = &self.cache
            && let Err(e) = cache.invalidate(&deleted.short_code).await
        {
            warn!(error = %e, short_code = %deleted.short_code, "Failed to invalidate cache after delete");
        }

        info!(id, short_code = %deleted.short_code, "Short link deleted");
        Ok(deleted)
    }

    /// Lists one page of links, newest first.
    ///
    /// `page` is 1-indexed (0 is treated as 1); `page_size` is clamped to
    /// `1..=MAX_PAGE_SIZE`.
    pub async fn list_short_links(&self, page: u32, page_size: u32) -> Result<LinkPage, StoreError> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

        let items = self
            .repository
            .list(i64::from(page), i64::from(page_size))
            .await?;
        let total = self.repository.count().await?;

        Ok(LinkPage {
            items,
            page,
            page_size,
            total,
        })
    }

    /// Counts all live links.
    pub async fn total_links(&self) -> Result<i64, StoreError> {
        self.repository.count().await
    }

    async fn admit_desired(
        &self,
        long_url: &str,
        desired_code: &str,
    ) -> Result<ShortLink, AdmissionError> {
        validate_custom_code(desired_code)?;
        self.validator.validate(long_url, desired_code).await?;

        let link = self
            .repository
            .insert(NewShortLink {
                long_url: long_url.to_string(),
                short_code: desired_code.to_string(),
            })
            .await?;

        Ok(link)
    }

    async fn admit_generated(&self, long_url: &str) -> Result<ShortLink, AdmissionError> {
        self.validator.check_long_url(long_url).await?;

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code();

            if self.validator.check_code(&code).await.is_err() {
                debug!(attempt, code = %code, "Generated code is reserved, retrying");
                continue;
            }

            let new_link = NewShortLink {
                long_url: long_url.to_string(),
                short_code: code,
            };

            match self.repository.insert(new_link).await {
                Ok(link) => return Ok(link),
                Err(StoreError::DuplicateCode) => {
                    debug!(attempt, "Generated code collided, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Code space exhausted while admitting short link"
        );
        Err(AdmissionError::CodeSpaceExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

fn record_admission(result: &Result<ShortLink, AdmissionError>) {
    let outcome = match result {
        Ok(_) => "created",
        Err(AdmissionError::Validation(ValidationError::DuplicateLongUrl)) => "duplicate_long_url",
        Err(AdmissionError::Validation(ValidationError::ReservedCode)) => "reserved_code",
        Err(AdmissionError::Validation(_)) => "invalid",
        Err(AdmissionError::Store(StoreError::DuplicateCode)) => "duplicate_code",
        Err(AdmissionError::Store(_)) => "store_error",
        Err(AdmissionError::CodeSpaceExhausted { .. }) => "code_space_exhausted",
    };

    metrics::counter!("shortlink_admissions_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockPathRegistry, MockShortLinkRepository};
    use crate::utils::code_generator::GENERATED_CODE_LEN;
    use chrono::Utc;

    fn stored(id: i64, new_link: &NewShortLink) -> ShortLink {
        ShortLink::new(
            id,
            new_link.long_url.clone(),
            new_link.short_code.clone(),
            Utc::now(),
            0,
        )
    }

    fn open_paths() -> MockPathRegistry {
        let mut paths = MockPathRegistry::new();
        paths.expect_path_is_reserved().returning(|_| false);
        paths
    }

    #[tokio::test]
    async fn test_create_with_generated_code() {
        let mut repo = MockShortLinkRepository::new();

        repo.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|new_link| {
                new_link.short_code.len() == GENERATED_CODE_LEN
                    && new_link.long_url == "https://example.com/page"
            })
            .times(1)
            .returning(|new_link| Ok(stored(10, &new_link)));

        let service = LinkService::new(Arc::new(repo), Arc::new(open_paths()));

        let link = service
            .create_short_link("https://example.com/page", "")
            .await
            .unwrap();

        assert_eq!(link.id, 10);
        assert_eq!(link.usage_count, 0);
        assert_eq!(link.short_code.len(), GENERATED_CODE_LEN);
    }

    #[tokio::test]
    async fn test_create_with_desired_code() {
        let mut repo = MockShortLinkRepository::new();
        let mut paths = MockPathRegistry::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        paths
            .expect_path_is_reserved()
            .withf(|code| code == "Promo_24")
            .times(1)
            .returning(|_| false);
        repo.expect_insert()
            .withf(|new_link| new_link.short_code == "Promo_24")
            .times(1)
            .returning(|new_link| Ok(stored(3, &new_link)));

        let service = LinkService::new(Arc::new(repo), Arc::new(paths));

        let link = service
            .create_short_link("https://example.com", "Promo_24")
            .await
            .unwrap();

        assert_eq!(link.short_code, "Promo_24");
    }

    #[tokio::test]
    async fn test_create_trims_long_url() {
        let mut repo = MockShortLinkRepository::new();

        repo.expect_find_by_long_url()
            .withf(|url| url == "https://example.com")
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|new_link| new_link.long_url == "https://example.com")
            .returning(|new_link| Ok(stored(1, &new_link)));

        let service = LinkService::new(Arc::new(repo), Arc::new(open_paths()));

        assert!(
            service
                .create_short_link("  https://example.com\n", "")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_create_invalid_url_touches_nothing() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_long_url().times(0);
        repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(repo), Arc::new(MockPathRegistry::new()));

        let err = service
            .create_short_link("not-a-url", "")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AdmissionError::Validation(ValidationError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_create_invalid_desired_code() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(repo), Arc::new(MockPathRegistry::new()));

        let err = service
            .create_short_link("https://example.com", "way-too-long-code")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AdmissionError::Validation(ValidationError::InvalidCode(_))
        ));
    }

    #[tokio::test]
    async fn test_create_duplicate_long_url_does_not_insert() {
        let mut repo = MockShortLinkRepository::new();

        repo.expect_find_by_long_url().times(1).returning(|url| {
            Ok(Some(ShortLink::new(
                5,
                url.to_string(),
                "exists".to_string(),
                Utc::now(),
                9,
            )))
        });
        repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(repo), Arc::new(open_paths()));

        let err = service
            .create_short_link("https://example.com", "")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AdmissionError::Validation(ValidationError::DuplicateLongUrl)
        );
    }

    #[tokio::test]
    async fn test_create_reserved_desired_code() {
        let mut repo = MockShortLinkRepository::new();
        let mut paths = MockPathRegistry::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_insert().times(0);
        paths.expect_path_is_reserved().returning(|code| code == "api");

        let service = LinkService::new(Arc::new(repo), Arc::new(paths));

        let err = service
            .create_short_link("https://example.com", "api")
            .await
            .unwrap_err();

        assert_eq!(err, AdmissionError::Validation(ValidationError::ReservedCode));
    }

    #[tokio::test]
    async fn test_desired_code_collision_is_not_retried() {
        let mut repo = MockShortLinkRepository::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::DuplicateCode));

        let service = LinkService::new(Arc::new(repo), Arc::new(open_paths()));

        let err = service
            .create_short_link("https://example.com", "taken")
            .await
            .unwrap_err();

        assert_eq!(err, AdmissionError::Store(StoreError::DuplicateCode));
    }

    #[tokio::test]
    async fn test_generated_code_collision_is_retried() {
        let mut repo = MockShortLinkRepository::new();
        let mut seq = mockall::Sequence::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_insert()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(StoreError::DuplicateCode));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(stored(8, &new_link)));

        let service = LinkService::new(Arc::new(repo), Arc::new(open_paths()));

        let link = service
            .create_short_link("https://example.com", "")
            .await
            .unwrap();

        assert_eq!(link.id, 8);
    }

    #[tokio::test]
    async fn test_code_space_exhausted_after_bounded_retries() {
        let mut repo = MockShortLinkRepository::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_insert()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| Err(StoreError::DuplicateCode));

        let service = LinkService::new(Arc::new(repo), Arc::new(open_paths()));

        let err = service
            .create_short_link("https://example.com", "")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AdmissionError::CodeSpaceExhausted {
                attempts: MAX_GENERATION_ATTEMPTS
            }
        );
    }

    #[tokio::test]
    async fn test_reserved_generated_codes_count_as_attempts() {
        let mut repo = MockShortLinkRepository::new();
        let mut paths = MockPathRegistry::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_insert().times(0);
        paths
            .expect_path_is_reserved()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| true);

        let service = LinkService::new(Arc::new(repo), Arc::new(paths));

        let err = service
            .create_short_link("https://example.com", "")
            .await
            .unwrap_err();

        assert!(matches!(err, AdmissionError::CodeSpaceExhausted { .. }));
    }

    #[tokio::test]
    async fn test_store_unavailable_is_not_retried() {
        let mut repo = MockShortLinkRepository::new();

        repo.expect_find_by_long_url().returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("pool timed out".to_string())));

        let service = LinkService::new(Arc::new(repo), Arc::new(open_paths()));

        let err = service
            .create_short_link("https://example.com", "")
            .await
            .unwrap_err();

        assert!(matches!(err, AdmissionError::Store(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_delete()
            .withf(|id| *id == 99)
            .returning(|_| Err(StoreError::NotFound));

        let service = LinkService::new(Arc::new(repo), Arc::new(MockPathRegistry::new()));

        assert_eq!(
            service.delete_short_link(99).await.unwrap_err(),
            StoreError::NotFound
        );
    }

    #[tokio::test]
    async fn test_list_clamps_pagination() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_list()
            .withf(|page, page_size| *page == 1 && *page_size == i64::from(MAX_PAGE_SIZE))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        repo.expect_count().times(1).returning(|| Ok(0));

        let service = LinkService::new(Arc::new(repo), Arc::new(MockPathRegistry::new()));

        let page = service.list_short_links(0, 10_000).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
        assert!(page.items.is_empty());
    }
}
