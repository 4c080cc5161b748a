//! Mock authentication configuration

use serde::Deserialize;

use crate::credentials::DEFAULT_FAILURE_PASSWORD;
use crate::latency::Latency;

/// Authentication behaviour configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Simulated login round-trip, in milliseconds
    pub login_latency: Latency,

    /// Simulated token verification round-trip, in milliseconds
    pub verify_latency: Latency,

    /// Claimed token validity, in hours
    pub token_ttl: u16,

    /// Enables the simulated login failure. If disabled, every login succeeds.
    pub simulate_failure: bool,

    /// Password for which login fails
    pub failure_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_latency: Latency::LOGIN,
            verify_latency: Latency::VERIFY,
            token_ttl: 24,
            simulate_failure: true,
            failure_password: DEFAULT_FAILURE_PASSWORD.to_owned(),
        }
    }
}

impl AuthConfig {
    /// Configuration without any simulated latency
    pub fn instant() -> Self {
        Self {
            login_latency: Latency::NONE,
            verify_latency: Latency::NONE,
            ..Self::default()
        }
    }
}
