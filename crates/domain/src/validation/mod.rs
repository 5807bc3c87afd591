//! Pure input validators
//!
//! Every validator is synchronous and side-effect-free: failures are
//! [`crate::DomainError`] values and successes carry the sanitized form
//! where one exists. The request core applies these before any network
//! activity; a validation failure is never retried.

mod api_key;
mod attachment;
mod base_url;
mod endpoint;
mod sanitize;

pub use api_key::validate_api_key;
pub use attachment::validate_attachment;
pub use base_url::validate_base_url;
pub use endpoint::validate_endpoint;
pub use sanitize::sanitize_value;
