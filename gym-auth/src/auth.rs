//! Mock authentication flow

use chrono::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::config::AuthConfig;
use crate::credentials::{AcceptAll, CredentialCheck, FailOnPassword};
use crate::latency::{Latency, Sleeper, TokioSleeper};
use crate::storage::{SessionStorage, TOKEN_KEY};
use crate::token::{self, Codec, Token};
use crate::user::User;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid credentials")]
    Authentication,
    #[error("Invalid token")]
    InvalidToken(#[from] token::Error),
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
pub struct Login {
    /// Session token for the logged in user
    pub token: Token,
    /// Logged in user
    pub user: User,
}

/// Mocked authentication backend
///
/// Every operation which would be a network call on a real backend is delayed by a random
/// duration. No credentials are stored anywhere: login fabricates a placeholder user for any
/// accepted email, and tokens are self-contained.
#[derive(Debug)]
pub struct MockAuth<S = TokioSleeper> {
    /// Token builder
    codec: Codec,
    /// Login round-trip simulation
    login_latency: Latency,
    /// Verification round-trip simulation
    verify_latency: Latency,
    /// Decides which logins fail
    credentials: Box<dyn CredentialCheck>,
    /// Latency suspension
    sleeper: S,
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new(TokioSleeper)
    }
}

impl<S: Sleeper> MockAuth<S> {
    /// Creates backend with default behaviour, suspending on the given sleeper
    pub fn new(sleeper: S) -> Self {
        Self::with_config(AuthConfig::default(), sleeper)
    }

    /// Creates backend from configuration
    pub fn with_config(config: AuthConfig, sleeper: S) -> Self {
        let credentials: Box<dyn CredentialCheck> = if config.simulate_failure {
            Box::new(FailOnPassword::new(config.failure_password))
        } else {
            Box::new(AcceptAll)
        };

        Self {
            codec: Codec::new(Duration::hours(config.token_ttl.into())),
            login_latency: config.login_latency,
            verify_latency: config.verify_latency,
            credentials,
            sleeper,
        }
    }

    /// Replaces the credential check
    pub fn with_credentials(mut self, credentials: impl CredentialCheck + 'static) -> Self {
        self.credentials = Box::new(credentials);
        self
    }

    /// Logs the user in, returning the session token and the user it is issued for
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Login, Error> {
        self.login_latency.simulate(&self.sleeper).await;

        if !self.credentials.accepts(email, password) {
            info!("Login rejected");
            return Err(Error::Authentication);
        }

        let user = User::placeholder(email);
        let token = self.codec.encode(user.clone());
        info!("Logged in");

        Ok(Login { token, user })
    }

    /// Verifies the token, returning the user it was issued for
    ///
    /// Token expiration is not checked.
    #[instrument(skip_all)]
    pub async fn verify(&self, token: &Token) -> Result<User, Error> {
        self.verify_latency.simulate(&self.sleeper).await;

        let user = token.decode().inspect_err(|err| {
            debug!(%err, "Token verification failed");
        })?;

        Ok(user)
    }

    /// Logs the user out
    ///
    /// This is a no-op: tokens are never revoked and the stored token is left intact. Clearing
    /// the storage is up to its owner.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        debug!("Logout requested, nothing to do");
    }

    /// Returns the user of the session token kept in the storage
    ///
    /// Any failure - missing token, token which can't be decoded or storage which is not
    /// available - results in no user.
    #[instrument(skip_all)]
    pub fn current_user(&self, storage: &impl SessionStorage) -> Option<User> {
        let token = match storage.read(TOKEN_KEY) {
            Ok(Some(token)) => Token::from(token),
            Ok(None) => return None,
            Err(err) => {
                debug!(%err, "Cannot read session token");
                return None;
            }
        };

        token
            .decode()
            .inspect_err(|err| debug!(%err, "Stored session token is invalid"))
            .ok()
    }

    /// Checks if the storage holds a valid session token
    pub fn is_authenticated(&self, storage: &impl SessionStorage) -> bool {
        self.current_user(storage).is_some()
    }
}
