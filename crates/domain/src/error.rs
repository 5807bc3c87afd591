//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or decoding.
///
/// Every variant is terminal: a value that fails validation cannot
/// succeed on retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The API key is missing, malformed, or a placeholder value.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    /// The base URL is invalid or points at a disallowed host.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The endpoint path is malformed.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A file attachment violates the attachment policy.
    #[error("invalid attachment: {0}")]
    InvalidAttachment(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The environment name is not recognized.
    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),

    /// A webhook payload could not be interpreted.
    #[error("invalid webhook payload: {0}")]
    InvalidWebhookPayload(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
