//! Endpoint path validation and normalization

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DomainError, DomainResult};

#[allow(clippy::expect_used)]
static ENDPOINT_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9/_-]+$").expect("valid regex"));

/// Normalizes and checks an endpoint path.
///
/// The returned value always starts with `/` and contains no repeated
/// slashes; validating it again returns it unchanged.
///
/// # Errors
///
/// Returns [`DomainError::InvalidEndpoint`] for empty input, path
/// traversal, or characters outside `[a-zA-Z0-9/_-]`.
pub fn validate_endpoint(raw: &str) -> DomainResult<String> {
    if raw.is_empty() {
        return Err(DomainError::InvalidEndpoint(
            "must not be empty".to_string(),
        ));
    }
    if raw.contains("..") {
        return Err(DomainError::InvalidEndpoint(
            "must not contain path traversal".to_string(),
        ));
    }

    let mut normalized = String::with_capacity(raw.len() + 1);
    normalized.push('/');
    let mut previous_was_slash = true;
    for c in raw.chars() {
        if c == '/' {
            if !previous_was_slash {
                normalized.push('/');
            }
            previous_was_slash = true;
        } else {
            normalized.push(c);
            previous_was_slash = false;
        }
    }

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    if !ENDPOINT_CHARSET.is_match(&normalized) {
        return Err(DomainError::InvalidEndpoint(
            "may only contain letters, digits, '/', '_' and '-'".to_string(),
        ));
    }

    Ok(normalized)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leading_slash_added() {
        assert_eq!(validate_endpoint("templates").unwrap(), "/templates");
        assert_eq!(validate_endpoint("/templates").unwrap(), "/templates");
    }

    #[test]
    fn test_duplicate_slashes_collapsed() {
        assert_eq!(
            validate_endpoint("//submissions///7").unwrap(),
            "/submissions/7"
        );
    }

    #[test]
    fn test_trailing_slash_removed() {
        assert_eq!(validate_endpoint("/templates/").unwrap(), "/templates");
    }

    #[test]
    fn test_idempotent() {
        let first = validate_endpoint("submitters//42/").unwrap();
        let second = validate_endpoint(&first).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_traversal_rejected() {
        assert!(validate_endpoint("/a/../b").is_err());
        assert!(validate_endpoint("..").is_err());
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert!(validate_endpoint("/a b").is_err());
        assert!(validate_endpoint("/a?x=1").is_err());
        assert!(validate_endpoint("/a%20b").is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(validate_endpoint("").is_err());
    }
}
