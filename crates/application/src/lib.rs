//! Countersign Application - Request core and drivers
//!
//! This crate defines the application layer with:
//! - Port traits (injected transport and credentials capabilities)
//! - The retrying request core
//! - Pagination and batch drivers built on top of it
//! - Webhook enrichment and thin typed resource helpers

pub mod client;
pub mod error;
pub mod ports;
pub mod resources;
pub mod webhook;

pub use client::{
    ApiClient, BatchOptions, BatchOutcome, ClientConfig, PageOptions, RetryPolicy,
};
pub use error::{ApiError, ApiResult};
pub use ports::{
    CredentialsError, CredentialsProvider, HttpTransport, MultipartField, TransportError,
    WireBody, WireRequest, WireResponse,
};
pub use resources::{
    CreateSubmission, SubmissionsClient, SubmitterInput, SubmittersClient, TemplatesClient,
};
pub use webhook::{EnrichWebhookEvent, EnrichedWebhookEvent};
