//! Submission operations

use serde::Serialize;
use serde_json::Value;

use countersign_domain::RequestDescriptor;

use crate::client::{ApiClient, PageOptions};
use crate::error::{ApiError, ApiResult};
use crate::ports::{CredentialsProvider, HttpTransport};

/// One signer on a new submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitterInput {
    /// Signer email address.
    pub email: String,
    /// Template role the signer fills, when the template names roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SubmitterInput {
    /// Creates a submitter with just an email address.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: None,
            name: None,
        }
    }

    /// Sets the template role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Payload for creating a submission from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSubmission {
    /// Template the submission is created from.
    pub template_id: i64,
    /// Whether the service emails signature requests itself.
    pub send_email: bool,
    /// Signers to invite.
    pub submitters: Vec<SubmitterInput>,
}

impl CreateSubmission {
    /// Creates a payload with service-sent emails enabled.
    #[must_use]
    pub const fn new(template_id: i64) -> Self {
        Self {
            template_id,
            send_email: true,
            submitters: Vec::new(),
        }
    }

    /// Adds a signer.
    #[must_use]
    pub fn with_submitter(mut self, submitter: SubmitterInput) -> Self {
        self.submitters.push(submitter);
        self
    }

    /// Disables service-sent emails.
    #[must_use]
    pub const fn without_email(mut self) -> Self {
        self.send_email = false;
        self
    }
}

/// Submission operations, borrowed from an [`ApiClient`].
pub struct SubmissionsClient<'a, T, C> {
    pub(crate) client: &'a ApiClient<T, C>,
}

impl<T: HttpTransport, C: CredentialsProvider> SubmissionsClient<'_, T, C> {
    /// Creates a submission from a template.
    ///
    /// # Errors
    ///
    /// Returns whatever the request core raises for `POST /submissions`.
    pub async fn create(&self, request: CreateSubmission) -> ApiResult<Value> {
        let body =
            serde_json::to_value(&request).map_err(|error| ApiError::Unknown(error.to_string()))?;
        self.client
            .request(RequestDescriptor::post("/submissions").with_body(body))
            .await
    }

    /// Fetches one submission.
    ///
    /// # Errors
    ///
    /// Returns whatever the request core raises.
    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client
            .request(RequestDescriptor::get(format!("/submissions/{id}")))
            .await
    }

    /// Archives one submission.
    ///
    /// # Errors
    ///
    /// Returns whatever the request core raises.
    pub async fn archive(&self, id: i64) -> ApiResult<Value> {
        self.client
            .request(RequestDescriptor::delete(format!("/submissions/{id}")))
            .await
    }

    /// Lists submissions through the pagination driver.
    ///
    /// # Errors
    ///
    /// Returns whatever the pagination driver raises.
    pub async fn list(&self, options: PageOptions) -> ApiResult<Vec<Value>> {
        self.client
            .request_all_pages(RequestDescriptor::get("/submissions"), options)
            .await
    }
}
