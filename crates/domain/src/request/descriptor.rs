//! Request descriptor type

use serde_json::{Map, Value};
use uuid::Uuid;

use super::{FileAttachment, HttpMethod};

/// Default number of attempts allotted to one logical call.
pub const DEFAULT_RETRY_BUDGET: u32 = 3;

/// Complete description of one logical API operation.
///
/// Built fresh per call and treated as immutable once constructed. The
/// endpoint is validated and normalized by the request core before any
/// network activity.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Correlation id for this logical call, carried into transport logs.
    pub id: Uuid,
    /// HTTP method
    pub method: HttpMethod,
    /// Endpoint path relative to the base URL, e.g. `/submissions`
    pub endpoint: String,
    /// Optional JSON body
    pub body: Option<Value>,
    /// Query parameters (scalar values)
    pub query: Map<String, Value>,
    /// File attachments; when non-empty the call is sent as multipart
    /// form data and JSON body encoding is disabled
    pub attachments: Vec<FileAttachment>,
    /// Maximum attempts for this call, transient failures included
    pub retry_budget: u32,
}

impl RequestDescriptor {
    /// Creates a descriptor with the given method and endpoint.
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            endpoint: endpoint.into(),
            body: None,
            query: Map::new(),
            attachments: Vec::new(),
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }

    /// Creates a GET descriptor.
    #[must_use]
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// Creates a POST descriptor.
    #[must_use]
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    /// Creates a PATCH descriptor.
    #[must_use]
    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, endpoint)
    }

    /// Creates a DELETE descriptor.
    #[must_use]
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds a file attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: FileAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Overrides the retry budget.
    #[must_use]
    pub const fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Returns a copy with a fresh correlation id.
    ///
    /// Used by the pagination driver so each page request is logged as
    /// its own call.
    #[must_use]
    pub fn with_fresh_id(mut self) -> Self {
        self.id = Uuid::now_v7();
        self
    }

    /// Returns true if the call carries file attachments.
    #[must_use]
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_get_descriptor() {
        let descriptor = RequestDescriptor::get("/templates");
        assert_eq!(descriptor.method, HttpMethod::Get);
        assert_eq!(descriptor.endpoint, "/templates");
        assert_eq!(descriptor.retry_budget, DEFAULT_RETRY_BUDGET);
        assert!(!descriptor.has_attachments());
    }

    #[test]
    fn test_builder_chain() {
        let descriptor = RequestDescriptor::post("/submissions")
            .with_body(json!({"template_id": 7}))
            .with_query("limit", 10)
            .with_retry_budget(5);

        assert_eq!(descriptor.body, Some(json!({"template_id": 7})));
        assert_eq!(descriptor.query.get("limit"), Some(&json!(10)));
        assert_eq!(descriptor.retry_budget, 5);
    }

    #[test]
    fn test_fresh_id_changes_only_the_id() {
        let descriptor = RequestDescriptor::get("/submissions").with_query("limit", 3);
        let refreshed = descriptor.clone().with_fresh_id();

        assert_ne!(descriptor.id, refreshed.id);
        assert_eq!(descriptor.endpoint, refreshed.endpoint);
        assert_eq!(descriptor.query, refreshed.query);
    }
}
