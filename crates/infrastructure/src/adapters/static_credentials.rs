//! In-memory credentials provider

use async_trait::async_trait;

use countersign_application::ports::{CredentialsError, CredentialsProvider};
use countersign_domain::Credentials;

/// Credentials provider holding one fixed record.
///
/// Suitable for CLIs and services where the key is known at startup. A
/// host that rotates keys should implement its own provider; the core
/// re-resolves credentials on every call.
pub struct StaticCredentialsProvider {
    credentials: Credentials,
}

impl StaticCredentialsProvider {
    /// Wraps a fixed credential record.
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentialsProvider {
    async fn credentials(&self) -> Result<Credentials, CredentialsError> {
        Ok(self.credentials.clone())
    }
}
