//! Inbound webhook payloads
//!
//! The signing service posts JSON events such as `submission.created`
//! or `form.completed`. Only the fields the core acts on are typed;
//! everything else is kept verbatim in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// One decoded webhook delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Event name, e.g. `form.completed`.
    pub event: String,
    /// Submission the event refers to, when the event carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<i64>,
    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookPayload {
    /// Decodes an inbound POST body.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidWebhookPayload`] when the body is
    /// not an object or lacks an `event` field.
    pub fn parse(body: &Value) -> DomainResult<Self> {
        serde_json::from_value(body.clone())
            .map_err(|e| DomainError::InvalidWebhookPayload(e.to_string()))
    }
}
