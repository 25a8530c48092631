//! Short code generation and validation utilities.
//!
//! Generated codes are drawn from the alphanumeric alphabet only. Desired
//! codes supplied by administrators may additionally use `-` and `_`.

use crate::domain::errors::ValidationError;

/// Length of generated codes.
pub const GENERATED_CODE_LEN: usize = 6;

/// Longest short code the registry accepts (matches the `VARCHAR(10)` column).
pub const MAX_CODE_LEN: usize = 10;

/// Alphabet for generated codes: 62 symbols, all URL-safe.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random 6-character alphanumeric short code.
///
/// Uniqueness is not guaranteed here; the store's unique index decides, and
/// callers retry on [`crate::domain::errors::StoreError::DuplicateCode`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    use rand::Rng;

    let mut rng = rand::rng();

    (0..GENERATED_CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Returns `true` if `code` could be a stored short code.
///
/// Used by the redirect resolver to reject paths without touching the store.
pub fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Validates an administrator-supplied short code as-is (no normalization).
///
/// # Rules
///
/// - Length: 1-10 characters
/// - Allowed characters: ASCII letters, digits, `-`, `_`
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCode`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || code.len() > MAX_CODE_LEN {
        return Err(ValidationError::InvalidCode(format!(
            "must be 1-{} characters, got {}",
            MAX_CODE_LEN,
            code.chars().count()
        )));
    }

    if !is_well_formed_code(code) {
        return Err(ValidationError::InvalidCode(
            "may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code().len(), GENERATED_CODE_LEN);
    }

    #[test]
    fn test_generate_code_is_alphanumeric() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_mostly_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();

        // 62^6 codes; a collision among 1000 draws is possible but vanishingly rare.
        assert!(codes.len() >= 999);
    }

    #[test]
    fn test_generated_codes_are_well_formed() {
        for _ in 0..100 {
            assert!(is_well_formed_code(&generate_code()));
        }
    }

    #[test]
    fn test_validate_single_character() {
        assert!(validate_custom_code("a").is_ok());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_custom_code("abcdefghij").is_ok());
    }

    #[test]
    fn test_validate_mixed_case_is_kept() {
        assert!(validate_custom_code("MyCode").is_ok());
        assert!(validate_custom_code("promo_2025").is_ok());
        assert!(validate_custom_code("spring-24").is_ok());
    }

    #[test]
    fn test_validate_empty_string() {
        let err = validate_custom_code("").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCode(_)));
    }

    #[test]
    fn test_validate_too_long() {
        let err = validate_custom_code("abcdefghijk").unwrap_err();
        assert!(err.to_string().contains("1-10 characters"));
    }

    #[test]
    fn test_validate_rejects_slashes_and_spaces() {
        assert!(validate_custom_code("a/b").is_err());
        assert!(validate_custom_code("my code").is_err());
        assert!(validate_custom_code("üñí").is_err());
    }

    #[test]
    fn test_is_well_formed_code_rejects_nested_paths() {
        assert!(!is_well_formed_code("api/links"));
        assert!(!is_well_formed_code(""));
        assert!(!is_well_formed_code("favicon.ico"));
    }
}
