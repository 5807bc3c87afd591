//! The request core
//!
//! One logical API operation: validate, sanitize, resolve credentials,
//! assemble the wire request, then attempt it under the retry budget.
//! Validation and credential failures are terminal and never reach the
//! network; only transient failures are retried.

use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use countersign_domain::{
    Credentials, DomainError, FileAttachment, RequestDescriptor, sanitize_value,
    validate_api_key, validate_attachment, validate_base_url, validate_endpoint,
};

use super::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::ports::{
    CredentialsProvider, HttpTransport, MultipartField, WireBody, WireRequest,
};

impl<T: HttpTransport, C: CredentialsProvider> ApiClient<T, C> {
    /// Performs one logical API operation, transparently retrying
    /// transient failures, and returns the decoded response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] with the taxonomy described on that type;
    /// validation and authentication failures are raised before any
    /// network attempt.
    pub async fn request(&self, descriptor: RequestDescriptor) -> ApiResult<Value> {
        let endpoint = validate_endpoint(&descriptor.endpoint)?;
        let body = descriptor.body.as_ref().map(sanitize_value);
        let query = sanitized_query_pairs(&descriptor.query);

        let credentials = self.credentials.credentials().await?;
        let api_key = self.resolve_api_key(&credentials)?;
        let base_url = validate_base_url(&credentials.base_url)?;
        let url = join_endpoint(&base_url, &endpoint)?;

        for attachment in &descriptor.attachments {
            validate_attachment(attachment, &self.config.attachment_policy)?;
        }

        let headers = vec![
            ("X-Auth-Token".to_string(), api_key),
            ("User-Agent".to_string(), self.config.user_agent.clone()),
        ];
        let wire_body = build_wire_body(body, &descriptor.attachments);

        let budget = descriptor.retry_budget.max(1);
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let wire = WireRequest {
                id: descriptor.id,
                method: descriptor.method,
                url: url.clone(),
                headers: headers.clone(),
                query: query.clone(),
                body: wire_body.clone(),
                timeout: self.config.timeout,
            };

            let failure = match self.transport.send(wire).await {
                Ok(response) if response.is_success() => {
                    debug!(
                        request_id = %descriptor.id,
                        attempt,
                        status = response.status,
                        "request succeeded"
                    );
                    return Ok(response.body);
                }
                Ok(response) => ApiError::from_status(response.status, &response.body),
                Err(error) => ApiError::Network(error),
            };

            if attempt >= budget || !failure.is_transient() {
                warn!(
                    request_id = %descriptor.id,
                    attempt,
                    error = %failure,
                    "request failed"
                );
                return Err(failure);
            }

            let delay = self.config.retry.delay_for(attempt);
            debug!(
                request_id = %descriptor.id,
                attempt,
                ?delay,
                "transient failure, backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn resolve_api_key(&self, credentials: &Credentials) -> ApiResult<String> {
        let api_key = credentials.active_key();
        if api_key.is_empty() {
            return Err(ApiError::Auth(format!(
                "no API key configured for the {} environment",
                credentials.environment
            )));
        }
        validate_api_key(api_key).map_err(|error| ApiError::Auth(error.to_string()))?;
        Ok(api_key.to_string())
    }
}

/// Stringifies and sanitizes query parameters.
fn sanitized_query_pairs(query: &Map<String, Value>) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(key, value)| {
            let sanitized = sanitize_value(value);
            (key.clone(), scalar_string(&sanitized))
        })
        .collect()
}

/// Renders a JSON value the way it should appear in a query string.
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn join_endpoint(base_url: &Url, endpoint: &str) -> ApiResult<Url> {
    let joined = format!("{}{}", base_url.as_str().trim_end_matches('/'), endpoint);
    Url::parse(&joined).map_err(|error| {
        ApiError::Validation(DomainError::InvalidBaseUrl(format!("{error}: {joined}")))
    })
}

fn build_wire_body(body: Option<Value>, attachments: &[FileAttachment]) -> WireBody {
    if attachments.is_empty() {
        return body.map_or(WireBody::Empty, WireBody::Json);
    }

    // Multipart disables JSON encoding: top-level body fields become
    // text parts next to the file parts.
    let mut fields = Vec::new();
    if let Some(Value::Object(map)) = body {
        for (name, value) in map {
            fields.push(MultipartField::Text {
                name,
                value: scalar_string(&value),
            });
        }
    }
    fields.extend(attachments.iter().cloned().map(MultipartField::File));
    WireBody::Multipart(fields)
}
