//! Error taxonomy of the registry core.
//!
//! These errors are transport-agnostic. The HTTP layer maps them onto
//! [`crate::error::AppError`]; the admin CLI prints them directly.

use thiserror::Error;

/// Failures reported by a [`crate::domain::repositories::ShortLinkRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The storage-level unique index on `short_code` rejected the insert.
    #[error("short code already exists")]
    DuplicateCode,

    /// No live short link matches the given id.
    #[error("short link not found")]
    NotFound,

    /// The backing store could not be reached or failed the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Admission-time conflicts detected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the long URL already exists in the registry")]
    DuplicateLongUrl,

    #[error("the short code conflicts with an existing path")]
    ReservedCode,

    #[error("invalid short code: {0}")]
    InvalidCode(String),

    #[error("invalid long URL: {0}")]
    InvalidUrl(String),
}

/// Everything that can stop an admission request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Every generated candidate collided. Widen the alphabet or code length.
    #[error("no free short code found after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts_into_admission_error() {
        let err: AdmissionError = ValidationError::ReservedCode.into();
        assert_eq!(err, AdmissionError::Validation(ValidationError::ReservedCode));
        assert_eq!(
            err.to_string(),
            "the short code conflicts with an existing path"
        );
    }

    #[test]
    fn test_store_error_converts_into_admission_error() {
        let err: AdmissionError = StoreError::DuplicateCode.into();
        assert!(matches!(err, AdmissionError::Store(StoreError::DuplicateCode)));
    }

    #[test]
    fn test_code_space_exhausted_message_names_attempts() {
        let err = AdmissionError::CodeSpaceExhausted { attempts: 5 };
        assert!(err.to_string().contains("5 attempts"));
    }
}
