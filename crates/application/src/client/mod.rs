//! API client: the request core and the drivers built on it
//!
//! [`ApiClient`] performs one logical operation per call. It owns no
//! mutable state; concurrent calls share nothing but the injected ports.

mod batch;
mod paginate;
pub(crate) mod request;

pub use batch::{BatchOptions, BatchOutcome};
pub use paginate::PageOptions;

use std::sync::Arc;
use std::time::Duration;

use countersign_domain::AttachmentPolicy;

use crate::ports::{CredentialsProvider, HttpTransport};

/// Fixed client identifier sent with every request.
pub const CLIENT_IDENT: &str = concat!("countersign/", env!("CARGO_PKG_VERSION"));

/// Exponential backoff schedule for transient failures.
///
/// The delay before attempt `n + 1` is `base_delay * 2^(n-1)`, capped at
/// `max_delay`. There is no jitter: back-to-back calls that exhaust
/// their budgets can still thunder an already-struggling endpoint
/// (known limitation of the reference behavior).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Ceiling on any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Delay to wait after the given 1-based attempt fails.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let delay_ms = base_ms.saturating_mul(1_u64 << exponent);
        self.max_delay.min(Duration::from_millis(delay_ms))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

/// Client-wide settings shared by every call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Value of the client identifier header.
    pub user_agent: String,
    /// Backoff schedule for transient failures.
    pub retry: RetryPolicy,
    /// Pause before re-requesting a page after a 429 during pagination.
    pub rate_limit_pause: Duration,
    /// Limits applied to outgoing file attachments.
    pub attachment_policy: AttachmentPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: CLIENT_IDENT.to_string(),
            retry: RetryPolicy::default(),
            rate_limit_pause: Duration::from_secs(5),
            attachment_policy: AttachmentPolicy::default(),
        }
    }
}

/// Stateless client for one remote API, generic over its injected ports.
pub struct ApiClient<T, C> {
    pub(crate) transport: Arc<T>,
    pub(crate) credentials: Arc<C>,
    pub(crate) config: ClientConfig,
}

impl<T: HttpTransport, C: CredentialsProvider> ApiClient<T, C> {
    /// Creates a client with default configuration.
    #[must_use]
    pub fn new(transport: Arc<T>, credentials: Arc<C>) -> Self {
        Self::with_config(transport, credentials, ClientConfig::default())
    }

    /// Creates a client with explicit configuration.
    #[must_use]
    pub const fn with_config(
        transport: Arc<T>,
        credentials: Arc<C>,
        config: ClientConfig,
    ) -> Self {
        Self {
            transport,
            credentials,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl<T, C> Clone for ApiClient<T, C> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            credentials: Arc::clone(&self.credentials),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for(4), Duration::from_secs(8));
        // Ceiling applies from the fifth attempt on.
        assert_eq!(policy.delay_for(5), Duration::from_secs(10));
        assert_eq!(policy.delay_for(12), Duration::from_secs(10));
    }

    #[test]
    fn test_backoff_does_not_overflow() {
        let policy = RetryPolicy {
            base_delay: Duration::from_millis(u64::MAX / 2),
            max_delay: Duration::from_secs(10),
        };
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.rate_limit_pause, Duration::from_secs(5));
        assert!(config.user_agent.starts_with("countersign/"));
    }
}
