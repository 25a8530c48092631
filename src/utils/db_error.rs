//! Classification of SQLx errors into registry store errors.

use crate::domain::errors::StoreError;

/// Name of the unique constraint guarding `short_links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "short_links_short_code_key";

/// Returns `true` if `e` is the unique index on `short_code` rejecting a write.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    // `long_url` carries no unique index, so the code key is the only candidate.
    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT) | None)
}

/// Maps a SQLx error onto the store taxonomy.
///
/// Anything that is not a short-code collision is reported as
/// [`StoreError::Unavailable`] so callers surface it as a hard failure.
pub fn map_store_error(e: sqlx::Error) -> StoreError {
    if is_unique_violation_on_code(&e) {
        return StoreError::DuplicateCode;
    }

    tracing::error!(error = %e, "Registry store operation failed");
    StoreError::Unavailable(e.to_string())
}
