//! API key validation

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DomainError, DomainResult};

const MIN_KEY_LENGTH: usize = 20;

#[allow(clippy::expect_used)]
static KEY_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

#[allow(clippy::expect_used)]
static PLACEHOLDER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(demo|sample|example)").expect("valid regex"));

/// Checks an API key for shape problems that would make every call fail.
///
/// Rejects whitespace padding, keys shorter than 20 characters,
/// characters outside `[A-Za-z0-9_-]`, and obvious placeholder values
/// (`demo...`, `sample...`, `example...`, case-insensitive).
///
/// # Errors
///
/// Returns [`DomainError::InvalidApiKey`] describing the first rule the
/// key violates.
pub fn validate_api_key(key: &str) -> DomainResult<()> {
    if key.trim() != key {
        return Err(DomainError::InvalidApiKey(
            "must not contain leading or trailing whitespace".to_string(),
        ));
    }
    if key.len() < MIN_KEY_LENGTH {
        return Err(DomainError::InvalidApiKey(format!(
            "must be at least {MIN_KEY_LENGTH} characters"
        )));
    }
    if !KEY_CHARSET.is_match(key) {
        return Err(DomainError::InvalidApiKey(
            "may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }
    if PLACEHOLDER_PREFIX.is_match(key) {
        return Err(DomainError::InvalidApiKey(
            "looks like a placeholder value".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_key() {
        assert!(validate_api_key("abcDEF123-_abcDEF123").is_ok());
    }

    #[test]
    fn test_too_short() {
        let result = validate_api_key("short");
        assert!(matches!(result, Err(DomainError::InvalidApiKey(msg)) if msg.contains("20")));
    }

    #[test]
    fn test_whitespace_padding() {
        let result = validate_api_key(" padded ");
        assert!(matches!(result, Err(DomainError::InvalidApiKey(msg)) if msg.contains("whitespace")));
    }

    #[test]
    fn test_invalid_characters() {
        let result = validate_api_key("abcDEF123!_abcDEF123");
        assert!(matches!(result, Err(DomainError::InvalidApiKey(msg)) if msg.contains("letters")));
    }

    #[test]
    fn test_placeholder_prefix() {
        for key in [
            "demoXXXXXXXXXXXXXXXXXXXX",
            "SAMPLEXXXXXXXXXXXXXXXXXX",
            "Example-XXXXXXXXXXXXXXXX",
        ] {
            let result = validate_api_key(key);
            assert!(
                matches!(result, Err(DomainError::InvalidApiKey(msg)) if msg.contains("placeholder")),
                "{key} should be rejected as a placeholder"
            );
        }
    }

    #[test]
    fn test_empty_key() {
        assert!(validate_api_key("").is_err());
    }
}
