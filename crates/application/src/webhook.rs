//! Webhook enrichment use case
//!
//! Inbound deliveries carry a JSON body `{event, submission_id, ...}`.
//! Decoding is pure; optionally the referenced submission is fetched
//! through the request core so consumers see the full record instead of
//! just the id.

use serde_json::Value;

use countersign_domain::{RequestDescriptor, WebhookPayload};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::ports::{CredentialsProvider, HttpTransport};

/// A decoded webhook delivery, optionally enriched with the submission
/// record it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedWebhookEvent {
    /// The decoded delivery.
    pub payload: WebhookPayload,
    /// The referenced submission, when resolution was requested and the
    /// delivery carried a submission id.
    pub submission: Option<Value>,
}

/// Use case for handling one inbound webhook delivery.
pub struct EnrichWebhookEvent<T, C> {
    client: ApiClient<T, C>,
}

impl<T: HttpTransport, C: CredentialsProvider> EnrichWebhookEvent<T, C> {
    /// Creates the use case around an API client.
    #[must_use]
    pub const fn new(client: ApiClient<T, C>) -> Self {
        Self { client }
    }

    /// Decodes the delivery and, when `resolve_submission` is set and an
    /// id is present, fetches the submission record.
    ///
    /// # Errors
    ///
    /// Returns a validation error for undecodable bodies, or whatever
    /// the request core raises for the enrichment call.
    pub async fn execute(
        &self,
        body: &Value,
        resolve_submission: bool,
    ) -> ApiResult<EnrichedWebhookEvent> {
        let payload = WebhookPayload::parse(body)?;

        let submission = match (resolve_submission, payload.submission_id) {
            (true, Some(id)) => Some(
                self.client
                    .request(RequestDescriptor::get(format!("/submissions/{id}")))
                    .await?,
            ),
            _ => None,
        };

        Ok(EnrichedWebhookEvent {
            payload,
            submission,
        })
    }
}
