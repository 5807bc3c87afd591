//! Base URL validation

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Checks that a base URL is HTTPS and does not lexically point at an
/// internal host.
///
/// Rejected hosts: `localhost`, loopback (`127.*`), private ranges
/// (`10.*`, `172.16-31.*`, `192.168.*`) and link-local (`169.254.*`).
/// Literal or percent-encoded `..` anywhere in the URL is also rejected.
///
/// This is a lexical hostname check, not DNS resolution: a public
/// hostname that resolves to a private address is not caught. That is
/// the documented, pre-existing behavior; tightening it would change
/// observable validation outcomes.
///
/// # Errors
///
/// Returns [`DomainError::InvalidBaseUrl`] describing the first rule the
/// URL violates.
pub fn validate_base_url(raw: &str) -> DomainResult<Url> {
    // The url crate normalizes `a/../b` to `b` during parsing, so the
    // traversal check must run against the raw string.
    if raw.contains("..") || raw.to_ascii_lowercase().contains("%2e%2e") {
        return Err(DomainError::InvalidBaseUrl(
            "must not contain path traversal".to_string(),
        ));
    }

    let url =
        Url::parse(raw).map_err(|e| DomainError::InvalidBaseUrl(format!("{e}: {raw}")))?;

    if url.scheme() != "https" {
        return Err(DomainError::InvalidBaseUrl(
            "only HTTPS URLs are allowed".to_string(),
        ));
    }

    let host = url
        .host_str()
        .ok_or_else(|| DomainError::InvalidBaseUrl("missing host".to_string()))?;

    if is_internal_host(host) {
        return Err(DomainError::InvalidBaseUrl(format!(
            "host {host} is loopback, private or link-local"
        )));
    }

    Ok(url)
}

fn is_internal_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    if host == "localhost"
        || host.starts_with("127.")
        || host.starts_with("10.")
        || host.starts_with("192.168.")
        || host.starts_with("169.254.")
    {
        return true;
    }
    // 172.16.0.0/12: second octet 16 through 31.
    host.strip_prefix("172.")
        .and_then(|rest| rest.split('.').next())
        .and_then(|octet| octet.parse::<u8>().ok())
        .is_some_and(|octet| (16..=31).contains(&octet))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_url() {
        assert!(validate_base_url("https://example.com").is_ok());
        assert!(validate_base_url("https://api.docuseal.com").is_ok());
    }

    #[test]
    fn test_non_https_rejected() {
        let result = validate_base_url("http://example.com");
        assert!(matches!(result, Err(DomainError::InvalidBaseUrl(msg)) if msg.contains("HTTPS")));
    }

    #[test]
    fn test_private_hosts_rejected() {
        for url in [
            "https://localhost/api",
            "https://127.0.0.1/api",
            "https://10.0.0.8",
            "https://192.168.1.5/x",
            "https://169.254.0.1",
            "https://172.16.0.1",
            "https://172.31.255.1",
        ] {
            assert!(validate_base_url(url).is_err(), "{url} should be rejected");
        }
    }

    #[test]
    fn test_172_public_slice_allowed() {
        // Only 172.16-31.* is private.
        assert!(validate_base_url("https://172.15.0.1").is_ok());
        assert!(validate_base_url("https://172.32.0.1").is_ok());
    }

    #[test]
    fn test_traversal_rejected() {
        assert!(validate_base_url("https://example.com/a/../b").is_err());
        assert!(validate_base_url("https://example.com/a/%2E%2E/b").is_err());
    }

    #[test]
    fn test_public_hostname_resolving_private_is_not_caught() {
        // Lexical check only: this hostname may resolve anywhere.
        assert!(validate_base_url("https://internal.example.com").is_ok());
    }

    #[test]
    fn test_malformed_url() {
        assert!(validate_base_url("not a url").is_err());
    }
}
