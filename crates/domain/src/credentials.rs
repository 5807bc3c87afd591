//! Credentials and environment selection
//!
//! A credential record carries one API key per environment; the active
//! environment decides which key is sent. The record is supplied per call
//! by a credentials provider and is never mutated or persisted here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Default production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.docuseal.com";

/// The API environment a call is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live documents and legally binding signatures.
    #[default]
    Production,
    /// Sandbox documents; nothing sent here is binding.
    Test,
}

impl Environment {
    /// Returns the environment as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(DomainError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// API credentials with one key per environment.
///
/// The key for the active environment must be non-empty and pass
/// [`crate::validation::validate_api_key`]; that invariant is enforced by
/// the request core at call time, not at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Which environment's key is active.
    pub environment: Environment,
    /// API key used when the environment is `Production`.
    #[serde(default)]
    pub production_api_key: String,
    /// API key used when the environment is `Test`.
    #[serde(default)]
    pub test_api_key: String,
    /// Base URL all endpoints are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Credentials {
    /// Creates production credentials with the default base URL.
    #[must_use]
    pub fn production(api_key: impl Into<String>) -> Self {
        Self {
            environment: Environment::Production,
            production_api_key: api_key.into(),
            test_api_key: String::new(),
            base_url: default_base_url(),
        }
    }

    /// Creates test-environment credentials with the default base URL.
    #[must_use]
    pub fn test(api_key: impl Into<String>) -> Self {
        Self {
            environment: Environment::Test,
            production_api_key: String::new(),
            test_api_key: api_key.into(),
            base_url: default_base_url(),
        }
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the API key for the active environment.
    #[must_use]
    pub fn active_key(&self) -> &str {
        match self.environment {
            Environment::Production => &self.production_api_key,
            Environment::Test => &self.test_api_key,
        }
    }
}
