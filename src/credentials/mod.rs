pub mod prompt;

use subtle::ConstantTimeEq;
use thiserror::Error;

/// Environment variable holding the admin secret
pub const ENV_SECRET_VAR: &str = "ERP_SCORECARD_ADMIN_SECRET";

pub use prompt::{prompt_for_password, resolve_password};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("admin secret is not configured (set ERP_SCORECARD_ADMIN_SECRET)")]
    SecretNotConfigured,
    #[error("invalid admin password")]
    Rejected,
}

/// Checks whether a presented credential grants admin access.
pub trait CredentialVerifier {
    fn verify(&self, credential: &str) -> bool;
}

/// Compares the credential against one fixed secret in constant time.
///
/// An empty secret never matches anything, including an empty credential.
#[derive(Clone)]
pub struct StaticSecretVerifier {
    secret: String,
}

impl StaticSecretVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Build a verifier from `ERP_SCORECARD_ADMIN_SECRET`.
    ///
    /// Returns `SecretNotConfigured` when the variable is unset or blank.
    pub fn from_env() -> Result<Self, CredentialError> {
        match get_secret_from_env() {
            Some(secret) => Ok(Self::new(secret)),
            None => Err(CredentialError::SecretNotConfigured),
        }
    }
}

impl std::fmt::Debug for StaticSecretVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSecretVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl CredentialVerifier for StaticSecretVerifier {
    fn verify(&self, credential: &str) -> bool {
        if self.secret.is_empty() {
            return false;
        }
        self.secret.as_bytes().ct_eq(credential.as_bytes()).into()
    }
}

/// Require `credential` to pass `verifier`.
pub fn authorize(verifier: &dyn CredentialVerifier, credential: &str) -> Result<(), CredentialError> {
    if verifier.verify(credential) {
        Ok(())
    } else {
        tracing::warn!("admin credential rejected");
        Err(CredentialError::Rejected)
    }
}

/// Read the admin secret from the environment; None if unset or blank.
pub fn get_secret_from_env() -> Option<String> {
    match std::env::var(ENV_SECRET_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}
