//! Long URL validation for admission.

use url::Url;

use crate::domain::errors::ValidationError;

/// Checks that `long_url` is an absolute `http`/`https` URL with a host.
///
/// The input is not normalized: the registry stores and compares the exact
/// string the administrator submitted.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidUrl`] describing the first failed check.
pub fn validate_long_url(long_url: &str) -> Result<(), ValidationError> {
    if long_url.is_empty() {
        return Err(ValidationError::InvalidUrl("URL cannot be empty".to_string()));
    }

    // The stored string is sent back verbatim as the `Location` header.
    if long_url.bytes().any(|b| (b < 0x20 && b != b'\t') || b == 0x7f) {
        return Err(ValidationError::InvalidUrl(
            "URL contains control characters".to_string(),
        ));
    }

    let parsed = Url::parse(long_url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidUrl(format!(
                "unsupported scheme '{}', only http and https are allowed",
                other
            )));
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::InvalidUrl("URL has no host".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_long_url("https://example.com/page").is_ok());
        assert!(validate_long_url("http://example.com").is_ok());
        assert!(validate_long_url("https://example.com:8443/a?b=c#d").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(validate_long_url("").is_err());
    }

    #[test]
    fn test_rejects_relative_url() {
        let err = validate_long_url("/just/a/path").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        assert!(validate_long_url("javascript:alert(1)").is_err());
        assert!(validate_long_url("data:text/html,hi").is_err());
        assert!(validate_long_url("ftp://example.com/file").is_err());
    }

    #[test]
    fn test_rejects_control_characters() {
        for url in [
            "https://example.com/a\nb",
            "https://example.com/a\rb",
            "https://example.com/\u{1}",
            "https://example.com/\u{7f}",
        ] {
            let err = validate_long_url(url).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidUrl(_)), "{url:?}");
        }
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert!(validate_long_url("example.com").is_err());
    }
}
