//! Credential boundary.
//!
//! The settings layer owns key storage and encryption; this crate only
//! consumes a plaintext credential for the duration of one bot call.
//! [`CredentialSource`] is the port that layer implements.

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

/// Errors from credential lookup.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No credential is configured for this provider on this project.
    /// Surfaced to the player as a setup prompt.
    #[error("no API credential configured for provider: {provider}")]
    NotFound {
        /// The provider identifier that was looked up.
        provider: String,
    },
}

/// Port for credential lookup.
///
/// Implementations return the already-decrypted credential string.
/// Nothing in this crate persists or re-encrypts it.
pub trait CredentialSource: Send + Sync {
    /// Look up the credential for a provider on a project.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NotFound`] when none is configured.
    fn credential(&self, project_id: Uuid, provider: &str) -> Result<String, CredentialError>;
}

/// In-memory credential source for tests and embedding callers.
#[derive(Debug, Default)]
pub struct StaticCredentials {
    keys: HashMap<(Uuid, String), String>,
}

impl StaticCredentials {
    /// Create an empty credential source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential for a (project, provider) pair.
    #[must_use]
    pub fn with_credential(
        mut self,
        project_id: Uuid,
        provider: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        self.keys.insert((project_id, provider.into()), key.into());
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn credential(&self, project_id: Uuid, provider: &str) -> Result<String, CredentialError> {
        self.keys
            .get(&(project_id, provider.to_string()))
            .cloned()
            .ok_or_else(|| CredentialError::NotFound {
                provider: provider.to_string(),
            })
    }
}
