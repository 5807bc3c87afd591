//! Application error taxonomy
//!
//! Five families with distinct retry semantics: validation and
//! authentication failures are terminal (they cannot succeed on retry),
//! transient network failures and overload statuses are retried up to
//! the budget, other API statuses are terminal, and anything else falls
//! back to an unknown-error envelope.

use serde_json::Value;
use thiserror::Error;

use countersign_domain::{DomainError, Environment, ErrorEnvelope, HttpMethod};

use crate::ports::{CredentialsError, TransportError};

/// HTTP statuses classified as transient.
const RETRYABLE_STATUS: &[u16] = &[408, 429, 500, 502, 503, 504];

/// Error type for one logical API operation.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Input failed validation before any network activity.
    #[error("validation error: {0}")]
    Validation(#[from] DomainError),

    /// Credentials are missing, empty or malformed.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The transport failed below the HTTP layer.
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Short summary for the status.
        message: String,
        /// Longer description with remediation hints.
        description: String,
        /// Response body, when one was present.
        details: Option<Value>,
    },

    /// Fallback for failures that fit no other family.
    #[error("unknown error: {0}")]
    Unknown(String),
}

/// Result type alias for request-core operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<CredentialsError> for ApiError {
    fn from(error: CredentialsError) -> Self {
        Self::Auth(error.to_string())
    }
}

impl ApiError {
    /// Classifies a non-success HTTP status into an error with a fixed
    /// message/description pair.
    #[must_use]
    pub fn from_status(status: u16, body: &Value) -> Self {
        let (message, description) = match status {
            400 => (
                "Bad request",
                "The request payload was malformed or missing required fields.",
            ),
            401 => (
                "Invalid API key",
                "The API rejected the key for the active environment.",
            ),
            403 => (
                "Forbidden",
                "The API key does not grant access to this resource.",
            ),
            404 => ("Not found", "The requested resource does not exist."),
            408 => (
                "Request timeout",
                "The API did not answer in time. The call may be retried.",
            ),
            422 => (
                "Unprocessable entity",
                "The request was understood but could not be processed.",
            ),
            429 => (
                "Rate limit exceeded",
                "Too many requests. The call may be retried after a pause.",
            ),
            500 => (
                "Internal server error",
                "The API failed internally. The call may be retried.",
            ),
            502 | 503 | 504 => (
                "Service unavailable",
                "The API is temporarily unreachable. The call may be retried.",
            ),
            _ => (
                "Unexpected response",
                "The API answered with an unexpected status code.",
            ),
        };

        Self::Api {
            status,
            message: message.to_string(),
            description: description.to_string(),
            details: (!body.is_null()).then(|| body.clone()),
        }
    }

    /// True for failures likely to succeed on retry: retryable transport
    /// kinds and the overload statuses 408, 429 and 5xx.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(error) => error.is_transient(),
            Self::Api { status, .. } => RETRYABLE_STATUS.contains(status),
            Self::Validation(_) | Self::Auth(_) | Self::Unknown(_) => false,
        }
    }

    /// HTTP status code, when the failure came from a response.
    #[must_use]
    pub const fn http_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Builds the structured envelope surfaced to callers and logs.
    #[must_use]
    pub fn to_envelope(
        &self,
        method: HttpMethod,
        endpoint: &str,
        environment: Environment,
    ) -> ErrorEnvelope {
        match self {
            Self::Validation(error) => ErrorEnvelope::new(
                "Validation failed",
                error.to_string(),
                method.as_str(),
                endpoint,
                environment.as_str(),
            ),
            Self::Auth(message) => ErrorEnvelope::new(
                "Authentication failed",
                message.clone(),
                method.as_str(),
                endpoint,
                environment.as_str(),
            ),
            Self::Network(error) => ErrorEnvelope::new(
                "Network failure",
                error.to_string(),
                method.as_str(),
                endpoint,
                environment.as_str(),
            ),
            Self::Api {
                status,
                message,
                description,
                details,
            } => {
                let mut envelope = ErrorEnvelope::new(
                    message.clone(),
                    description.clone(),
                    method.as_str(),
                    endpoint,
                    environment.as_str(),
                )
                .with_http_code(*status);
                if let Some(details) = details {
                    envelope = envelope.with_details(details.clone());
                }
                envelope
            }
            Self::Unknown(message) => ErrorEnvelope::new(
                "Unknown error",
                message.clone(),
                method.as_str(),
                endpoint,
                environment.as_str(),
            ),
        }
    }
}
