//! Mock authentication for the gym membership front-end
//!
//! Simulates a login backend without any real security: tokens are Base64 encoded JSON with a
//! constant signature, every login succeeds unless the configured failure password is used, and
//! every network round-trip is imitated with a random delay. Meant for testing only.

pub mod auth;
pub mod config;
pub mod credentials;
pub mod latency;
pub mod storage;
pub mod token;
pub mod user;

pub use auth::{Login, MockAuth};
pub use config::AuthConfig;
pub use token::Token;
pub use user::{Membership, User};
