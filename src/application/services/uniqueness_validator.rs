//! Admission pre-checks for long URLs and candidate codes.

use std::sync::Arc;

use crate::domain::errors::{AdmissionError, ValidationError};
use crate::domain::repositories::{PathRegistry, ShortLinkRepository};

/// Checks a candidate `(long_url, short_code)` pair against live links and
/// reserved paths.
///
/// These checks give administrators readable errors; they are not atomic with
/// the insert that follows. The store's unique index on `short_code` stays the
/// authoritative guard.
pub struct UniquenessValidator<R: ShortLinkRepository + ?Sized, P: PathRegistry + ?Sized> {
    repository: Arc<R>,
    paths: Arc<P>,
}

impl<R: ShortLinkRepository + ?Sized, P: PathRegistry + ?Sized> UniquenessValidator<R, P> {
    /// Creates a validator over the given store and path registry.
    pub fn new(repository: Arc<R>, paths: Arc<P>) -> Self {
        Self { repository, paths }
    }

    /// Runs both checks, long URL first.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::DuplicateLongUrl`] if a live link has the identical URL
    /// - [`ValidationError::ReservedCode`] if the code shadows a reserved path
    /// - [`AdmissionError::Store`] if the store lookup fails
    pub async fn validate(&self, long_url: &str, candidate_code: &str) -> Result<(), AdmissionError> {
        self.check_long_url(long_url).await?;
        self.check_code(candidate_code).await?;
        Ok(())
    }

    /// Rejects a long URL already registered (exact string match).
    pub async fn check_long_url(&self, long_url: &str) -> Result<(), AdmissionError> {
        if self.repository.find_by_long_url(long_url).await?.is_some() {
            return Err(ValidationError::DuplicateLongUrl.into());
        }
        Ok(())
    }

    /// Rejects a code the host router already serves.
    pub async fn check_code(&self, candidate_code: &str) -> Result<(), ValidationError> {
        if self.paths.path_is_reserved(candidate_code).await {
            return Err(ValidationError::ReservedCode);
        }
        Ok(())
    }
}
