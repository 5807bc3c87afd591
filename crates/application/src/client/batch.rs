//! Batch driver
//!
//! Fans independent requests out in bounded concurrency groups with a
//! delay between groups. Per-request failures are captured as outcome
//! entries; the caller always gets one outcome per input request, in
//! input order.

use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use uuid::Uuid;

use countersign_domain::{Environment, ErrorEnvelope, HttpMethod, RequestDescriptor};

use super::ApiClient;
use crate::ports::{CredentialsProvider, HttpTransport};

/// Settings for one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Requests run concurrently within one group.
    pub batch_size: usize,
    /// Pause between groups.
    pub delay_between_batches: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: 5,
            delay_between_batches: Duration::from_millis(100),
        }
    }
}

/// Result of one request inside a batch.
#[derive(Debug, Clone)]
pub enum BatchOutcome {
    /// The request succeeded.
    Success {
        /// Correlation id of the request.
        request_id: Uuid,
        /// Decoded response body.
        value: Value,
    },
    /// The request failed; the batch continued without it.
    Failure {
        /// Correlation id of the request.
        request_id: Uuid,
        /// Human-readable failure summary.
        message: String,
        /// Structured envelope with full context.
        envelope: ErrorEnvelope,
    },
}

impl BatchOutcome {
    /// Returns true for successful entries.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Correlation id of the underlying request.
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        match self {
            Self::Success { request_id, .. } | Self::Failure { request_id, .. } => *request_id,
        }
    }

    /// The response body, for successful entries.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } => None,
        }
    }
}

impl<T, C> ApiClient<T, C>
where
    T: HttpTransport + 'static,
    C: CredentialsProvider + 'static,
{
    /// Runs independent requests in groups of `batch_size`, waiting
    /// `delay_between_batches` between groups.
    ///
    /// Partial-failure semantics: a failing request becomes a
    /// [`BatchOutcome::Failure`] entry instead of aborting the batch,
    /// and the output always has exactly one entry per input, in input
    /// order.
    pub async fn batch(
        &self,
        requests: Vec<RequestDescriptor>,
        options: BatchOptions,
    ) -> Vec<BatchOutcome> {
        let batch_size = options.batch_size.max(1);
        let total = requests.len();

        // One credential lookup up front, only to label failure
        // envelopes with the environment; each request still resolves
        // its own credentials through the core.
        let environment: Environment = self
            .credentials
            .credentials()
            .await
            .map(|credentials| credentials.environment)
            .unwrap_or_default();

        let contexts: Vec<(Uuid, HttpMethod, String)> = requests
            .iter()
            .map(|request| (request.id, request.method, request.endpoint.clone()))
            .collect();

        let mut outcomes: Vec<Option<BatchOutcome>> = (0..total).map(|_| None).collect();
        let mut remaining: Vec<(usize, RequestDescriptor)> =
            requests.into_iter().enumerate().collect();

        let mut group_index = 0_usize;
        while !remaining.is_empty() {
            if group_index > 0 {
                tokio::time::sleep(options.delay_between_batches).await;
            }
            let tail = remaining.split_off(batch_size.min(remaining.len()));
            let group = std::mem::replace(&mut remaining, tail);
            debug!(group = group_index, size = group.len(), "dispatching batch group");

            let mut tasks: JoinSet<(usize, BatchOutcome)> = JoinSet::new();
            for (index, descriptor) in group {
                let client = self.clone();
                tasks.spawn(async move {
                    let request_id = descriptor.id;
                    let method = descriptor.method;
                    let endpoint = descriptor.endpoint.clone();
                    let outcome = match client.request(descriptor).await {
                        Ok(value) => BatchOutcome::Success { request_id, value },
                        Err(error) => BatchOutcome::Failure {
                            request_id,
                            message: error.to_string(),
                            envelope: error.to_envelope(method, &endpoint, environment),
                        },
                    };
                    (index, outcome)
                });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((index, outcome)) => outcomes[index] = Some(outcome),
                    Err(join_error) => {
                        warn!(error = %join_error, "batch task aborted");
                    }
                }
            }
            group_index += 1;
        }

        outcomes
            .into_iter()
            .enumerate()
            .map(|(index, outcome)| {
                outcome.unwrap_or_else(|| {
                    let (request_id, method, endpoint) = contexts[index].clone();
                    BatchOutcome::Failure {
                        request_id,
                        message: "batch task aborted before completing".to_string(),
                        envelope: ErrorEnvelope::new(
                            "Unknown error",
                            "The batch task was aborted before completing.",
                            method.as_str(),
                            endpoint,
                            environment.as_str(),
                        ),
                    }
                })
            })
            .collect()
    }
}
