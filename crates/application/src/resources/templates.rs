//! Template operations

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tracing::warn;

use countersign_domain::RequestDescriptor;

use crate::client::{ApiClient, PageOptions};
use crate::error::ApiResult;
use crate::ports::{CredentialsProvider, HttpTransport};

/// Template operations, borrowed from an [`ApiClient`].
pub struct TemplatesClient<'a, T, C> {
    pub(crate) client: &'a ApiClient<T, C>,
}

impl<T: HttpTransport, C: CredentialsProvider> TemplatesClient<'_, T, C> {
    /// Fetches one template.
    ///
    /// # Errors
    ///
    /// Returns whatever the request core raises.
    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client
            .request(RequestDescriptor::get(format!("/templates/{id}")))
            .await
    }

    /// Lists templates through the pagination driver.
    ///
    /// # Errors
    ///
    /// Returns whatever the pagination driver raises.
    pub async fn list(&self, options: PageOptions) -> ApiResult<Vec<Value>> {
        self.client
            .request_all_pages(RequestDescriptor::get("/templates"), options)
            .await
    }

    /// Lists templates for UI pickers, swallowing failures into an
    /// empty list.
    ///
    /// This is one of the two documented swallow cases: a picker that
    /// cannot load options degrades to an empty dropdown instead of
    /// failing the surrounding flow. The failure is still logged.
    pub async fn list_for_picker(&self) -> Vec<Value> {
        match self.list(PageOptions::default()).await {
            Ok(templates) => templates,
            Err(error) => {
                warn!(error = %error, "template listing failed, returning empty list");
                Vec::new()
            }
        }
    }

    /// Creates a template from raw PDF bytes, base64-encoded inline.
    ///
    /// # Errors
    ///
    /// Returns whatever the request core raises for
    /// `POST /templates/pdf`.
    pub async fn create_from_pdf(&self, name: &str, bytes: &[u8]) -> ApiResult<Value> {
        let body = json!({
            "name": name,
            "documents": [{
                "name": name,
                "file": STANDARD.encode(bytes),
            }],
        });
        self.client
            .request(RequestDescriptor::post("/templates/pdf").with_body(body))
            .await
    }
}
