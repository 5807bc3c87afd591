//! Credentials provider port

use async_trait::async_trait;

use countersign_domain::Credentials;

/// Errors that can occur while looking up credentials.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CredentialsError {
    /// No credential record is available to this client.
    #[error("credentials unavailable: {0}")]
    Unavailable(String),
}

/// Port for resolving the credential record per call.
///
/// The core calls this once per logical operation and never caches the
/// result, so a provider may rotate keys between calls.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Returns the credential record for the next call.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError`] if no record can be resolved.
    async fn credentials(&self) -> Result<Credentials, CredentialsError>;
}
