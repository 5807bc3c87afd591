//! Structured error envelope
//!
//! Every failure surfaces to the caller as an envelope carrying enough
//! context to log or display without a stack trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deterministic description of one failed API call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Short human-readable summary, e.g. "Rate limit exceeded".
    pub message: String,
    /// Longer description with remediation hints.
    pub description: String,
    /// HTTP status code, when the failure came from a response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_code: Option<u16>,
    /// HTTP method of the failing call.
    pub method: String,
    /// Endpoint of the failing call.
    pub endpoint: String,
    /// Environment the call was addressed to.
    pub environment: String,
    /// Response body or error detail, when one was available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// When the failure was observed.
    pub timestamp: DateTime<Utc>,
}

impl ErrorEnvelope {
    /// Creates an envelope stamped with the current time.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        description: impl Into<String>,
        method: impl Into<String>,
        endpoint: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            description: description.into(),
            http_code: None,
            method: method.into(),
            endpoint: endpoint.into(),
            environment: environment.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Attaches the HTTP status code.
    #[must_use]
    pub const fn with_http_code(mut self, http_code: u16) -> Self {
        self.http_code = Some(http_code);
        self
    }

    /// Attaches a detail value.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}
