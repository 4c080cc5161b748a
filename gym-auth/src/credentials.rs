//! Credential checks
//!
//! There is no credential store. Checks only decide whether a login attempt is let through, so
//! front-ends can exercise both their happy and failure paths.

/// Decides whether a login attempt succeeds
pub trait CredentialCheck: Send + Sync + std::fmt::Debug {
    /// Returns `false` if the attempt should be rejected
    fn accepts(&self, email: &str, password: &str) -> bool;
}

/// Password which makes the default check fail
pub const DEFAULT_FAILURE_PASSWORD: &str = "error";

/// Accepts any credentials
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl CredentialCheck for AcceptAll {
    fn accepts(&self, _email: &str, _password: &str) -> bool {
        true
    }
}

/// Rejects exactly one password, for any email, and accepts everything else
#[derive(Debug, Clone, PartialEq)]
pub struct FailOnPassword {
    password: String,
}

impl FailOnPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl Default for FailOnPassword {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_PASSWORD)
    }
}

impl CredentialCheck for FailOnPassword {
    fn accepts(&self, _email: &str, password: &str) -> bool {
        password != self.password
    }
}
