//! Submitter operations

use serde_json::Value;

use countersign_domain::RequestDescriptor;

use crate::client::{ApiClient, PageOptions};
use crate::error::ApiResult;
use crate::ports::{CredentialsProvider, HttpTransport};

/// Submitter operations, borrowed from an [`ApiClient`].
pub struct SubmittersClient<'a, T, C> {
    pub(crate) client: &'a ApiClient<T, C>,
}

impl<T: HttpTransport, C: CredentialsProvider> SubmittersClient<'_, T, C> {
    /// Fetches one submitter.
    ///
    /// # Errors
    ///
    /// Returns whatever the request core raises.
    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client
            .request(RequestDescriptor::get(format!("/submitters/{id}")))
            .await
    }

    /// Updates fields on one submitter, e.g. pre-filled values or a new
    /// email address.
    ///
    /// # Errors
    ///
    /// Returns whatever the request core raises for
    /// `PATCH /submitters/{id}`.
    pub async fn update(&self, id: i64, fields: Value) -> ApiResult<Value> {
        self.client
            .request(RequestDescriptor::patch(format!("/submitters/{id}")).with_body(fields))
            .await
    }

    /// Lists submitters through the pagination driver.
    ///
    /// # Errors
    ///
    /// Returns whatever the pagination driver raises.
    pub async fn list(&self, options: PageOptions) -> ApiResult<Vec<Value>> {
        self.client
            .request_all_pages(RequestDescriptor::get("/submitters"), options)
            .await
    }
}
