//! HTTP transport port

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use countersign_domain::{FileAttachment, HttpMethod};

/// Transport-level failures.
///
/// Reserved for failures below the HTTP layer; a response with an error
/// status is returned as a [`WireResponse`] and classified by the core.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The hostname could not be resolved.
    #[error("DNS lookup failed for {host}")]
    DnsNotFound {
        /// Hostname that failed to resolve.
        host: String,
    },

    /// The peer closed the connection mid-flight.
    #[error("connection reset by peer")]
    ConnectionReset,

    /// Nothing is listening at the target address.
    #[error("connection refused by {host}")]
    ConnectionRefused {
        /// Host that refused the connection.
        host: String,
    },

    /// Any other connection-level failure.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The request could not be assembled at all.
    #[error("could not assemble request: {0}")]
    InvalidRequest(String),

    /// Fallback for failures the transport could not classify.
    #[error("transport failure: {0}")]
    Other(String),
}

impl TransportError {
    /// True for the failure kinds likely to succeed on retry:
    /// timeout, DNS lookup failure and connection reset.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::DnsNotFound { .. } | Self::ConnectionReset
        )
    }
}

/// One part of a multipart form body.
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartField {
    /// Plain text field.
    Text {
        /// Form field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// File part carrying raw bytes.
    File(FileAttachment),
}

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum WireBody {
    /// No body.
    Empty,
    /// JSON-encoded body.
    Json(Value),
    /// Multipart form data; JSON encoding is disabled for these calls.
    Multipart(Vec<MultipartField>),
}

/// Fully assembled outbound request, ready for a transport.
#[derive(Debug, Clone)]
pub struct WireRequest {
    /// Correlation id of the logical call this attempt belongs to.
    pub id: Uuid,
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute request URL (base + normalized endpoint).
    pub url: Url,
    /// Headers, including authentication.
    pub headers: Vec<(String, String)>,
    /// Query parameters, already stringified.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: WireBody,
    /// Per-attempt timeout.
    pub timeout: Duration,
}

/// Decoded response from a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct WireResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body; `Null` when the response had no body.
    pub body: Value,
}

impl WireResponse {
    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Port for sending one HTTP request.
///
/// Implementations perform exactly one network attempt per call; the
/// retry loop lives in the request core.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the decoded response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for failures below the HTTP layer;
    /// error statuses are returned as ordinary responses.
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_kinds() {
        assert!(TransportError::Timeout { timeout_ms: 30_000 }.is_transient());
        assert!(
            TransportError::DnsNotFound {
                host: "api.example.com".to_string()
            }
            .is_transient()
        );
        assert!(TransportError::ConnectionReset.is_transient());
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(
            !TransportError::ConnectionRefused {
                host: "api.example.com".to_string()
            }
            .is_transient()
        );
        assert!(!TransportError::InvalidRequest("bad part".to_string()).is_transient());
        assert!(!TransportError::Other("boom".to_string()).is_transient());
    }

    #[test]
    fn test_response_success_range() {
        let ok = WireResponse {
            status: 201,
            body: Value::Null,
        };
        assert!(ok.is_success());

        let redirect = WireResponse {
            status: 301,
            body: Value::Null,
        };
        assert!(!redirect.is_success());
    }
}
