//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. It performs exactly
//! one network attempt per call; the retry loop stays in the request
//! core.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::debug;

use countersign_application::ports::{
    HttpTransport, TransportError, WireBody, WireRequest, WireResponse,
};
use countersign_domain::HttpMethod;

use crate::http::build_multipart_form;

/// HTTP transport backed by `reqwest::Client`.
///
/// Default configuration:
/// - Follow redirects: up to 10
/// - TLS verification: enabled
///
/// Timeouts are taken per request from the wire descriptor, not from
/// the client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|error| TransportError::Other(error.to_string()))?;
        Ok(Self { client })
    }

    /// Creates a transport around a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the domain method to a reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to transport error kinds.
    ///
    /// The classification drives retry behavior upstream, so only
    /// timeout, DNS and reset failures may map to transient kinds.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }

        let host = error
            .url()
            .and_then(|url| url.host_str())
            .unwrap_or("unknown")
            .to_string();
        let message = error.to_string();
        let lowered = message.to_lowercase();

        if error.is_connect() {
            if lowered.contains("dns") || lowered.contains("resolve") {
                return TransportError::DnsNotFound { host };
            }
            if lowered.contains("refused") {
                return TransportError::ConnectionRefused { host };
            }
            if lowered.contains("reset") {
                return TransportError::ConnectionReset;
            }
            return TransportError::Connection(message);
        }

        if lowered.contains("reset") {
            return TransportError::ConnectionReset;
        }

        TransportError::Other(message)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let timeout_ms = u64::try_from(request.timeout.as_millis()).unwrap_or(u64::MAX);

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone())
            .timeout(request.timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            WireBody::Empty => builder,
            WireBody::Json(ref body) => builder.json(body),
            WireBody::Multipart(ref fields) => builder.multipart(build_multipart_form(fields)?),
        };

        debug!(
            request_id = %request.id,
            method = %request.method,
            url = %request.url,
            "sending request"
        );

        let response = builder
            .send()
            .await
            .map_err(|error| Self::map_error(&error, timeout_ms))?;
        let status = response.status().as_u16();

        let bytes = response
            .bytes()
            .await
            .map_err(|error| TransportError::Other(format!("failed to read body: {error}")))?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                // Non-JSON bodies are kept verbatim so error envelopes
                // can still surface them.
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        Ok(WireResponse { status, body })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }
}
