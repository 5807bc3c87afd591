//! Pagination driver
//!
//! Repeatedly invokes the request core to assemble a bounded,
//! cursor-paginated result set. Each page request gets `limit` set to
//! whatever is still needed and, after the first page, `after` set to
//! the cursor extracted from the previous page.

use serde_json::Value;
use tracing::{debug, warn};

use countersign_domain::{Cursor, Page, RequestDescriptor};

use super::ApiClient;
use crate::error::ApiResult;
use crate::ports::{CredentialsProvider, HttpTransport};

/// Sub-chunk size used when appending in memory-optimized mode.
const APPEND_CHUNK: usize = 50;
/// Cooperative yield interval, counted in appended sub-chunks.
const YIELD_EVERY_CHUNKS: usize = 4;

/// Settings for one pagination pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    /// Records requested per page.
    pub batch_size: usize,
    /// Hard ceiling on the accumulated result set.
    pub max_items: usize,
    /// Append in sub-chunks with periodic cooperative yields, bounding
    /// peak working-set growth during very large pulls.
    pub memory_optimized: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_items: 10_000,
            memory_optimized: false,
        }
    }
}

impl PageOptions {
    /// Overrides the page size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Overrides the result-set ceiling.
    #[must_use]
    pub const fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }
}

impl<T: HttpTransport, C: CredentialsProvider> ApiClient<T, C> {
    /// Pulls every page of a list call until the cursor runs out or the
    /// item ceiling is reached.
    ///
    /// Cursor extraction follows the decoded [`Page`] shape: envelopes
    /// carry an explicit cursor; a bare array that exactly fills the
    /// requested limit is assumed to have a successor, keyed by its last
    /// record's `id` (this heuristic can over-fetch one empty page or
    /// under-fetch when the page size exactly matches the remaining
    /// records — inherited behavior). An unrecognized shape stops the
    /// pull. A 429 from the core pauses `rate_limit_pause` and retries
    /// the same page rather than aborting.
    ///
    /// # Errors
    ///
    /// Returns the first non-rate-limit [`crate::ApiError`] raised by
    /// the underlying page requests.
    pub async fn request_all_pages(
        &self,
        descriptor: RequestDescriptor,
        options: PageOptions,
    ) -> ApiResult<Vec<Value>> {
        let batch_size = options.batch_size.max(1);
        let mut collected: Vec<Value> = Vec::new();
        let mut cursor: Option<Cursor> = None;

        loop {
            let remaining = options.max_items.saturating_sub(collected.len());
            if remaining == 0 {
                break;
            }
            let limit = batch_size.min(remaining);

            let mut page_request = descriptor.clone().with_fresh_id();
            page_request
                .query
                .insert("limit".to_string(), Value::from(limit));
            if let Some(active) = &cursor {
                page_request
                    .query
                    .insert("after".to_string(), active.as_query_value());
            }

            let response = match self.request(page_request).await {
                Ok(response) => response,
                Err(error) if error.http_code() == Some(429) => {
                    warn!(
                        pause = ?self.config.rate_limit_pause,
                        fetched = collected.len(),
                        "rate limited mid-pull, pausing before retrying the page"
                    );
                    tokio::time::sleep(self.config.rate_limit_pause).await;
                    continue;
                }
                Err(error) => return Err(error),
            };

            let (items, next) = match Page::decode(&response) {
                Page::Envelope { items, next } => (items, next),
                Page::BareArray(items) => {
                    // Full-page heuristic: a page that exactly fills the
                    // limit implies more may exist.
                    let next = if items.len() == limit {
                        Page::last_id_cursor(&items)
                    } else {
                        None
                    };
                    (items, next)
                }
                Page::Unrecognized => {
                    debug!(fetched = collected.len(), "unrecognized page shape, stopping");
                    break;
                }
            };

            let accepted = remaining.min(items.len());
            let truncated: Vec<Value> = items.into_iter().take(accepted).collect();
            if options.memory_optimized {
                append_chunked(&mut collected, truncated).await;
            } else {
                collected.extend(truncated);
            }
            debug!(fetched = collected.len(), "page accumulated");

            match next {
                Some(active) => cursor = Some(active),
                None => break,
            }
        }

        Ok(collected)
    }
}

async fn append_chunked(collected: &mut Vec<Value>, items: Vec<Value>) {
    let mut appended_chunks = 0;
    let mut source = items.into_iter();
    loop {
        let chunk: Vec<Value> = source.by_ref().take(APPEND_CHUNK).collect();
        if chunk.is_empty() {
            break;
        }
        collected.extend(chunk);
        appended_chunks += 1;
        if appended_chunks % YIELD_EVERY_CHUNKS == 0 {
            tokio::task::yield_now().await;
        }
    }
}
