//! Session token codec
//!
//! A session token imitates the shape of a signed web token: `{header}.{payload}.{signature}`.
//! `header` and `payload` are Base64 encoded JSON documents, `signature` is a constant. Nothing
//! about the token is cryptographically protected. Anyone can forge one, so it is purposed only
//! for testing front-ends against a mocked backend.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::{DecodePaddingMode, Engine};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::user::User;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid token format: expected 3 segments, found {found}")]
    SegmentCount { found: usize },
    #[error("Token payload is not valid Base64")]
    PayloadEncoding(#[from] base64::DecodeError),
    #[error("Token payload is malformed")]
    PayloadFormat(#[from] serde_json::Error),
}

/// Segments delimiter
const DELIMITER: char = '.';

/// Placeholder for the signature segment. It is never verified.
pub const SIGNATURE: &str = "mock-signature";

/// Default time the token claims to be valid for
pub const DEFAULT_TTL: Duration = Duration::hours(24);

/// Standard Base64, padded on encoding. Padding is optional on decoding.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Token header document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: "HS256".to_owned(),
            typ: "JWT".to_owned(),
        }
    }
}

/// Data carried in the token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user
    pub user: User,
    /// Claimed expiration time. Informative only, it is never enforced.
    #[serde(rename = "exp", with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

/// Part of the payload needed to recover the user. Other claims are ignored.
#[derive(Deserialize)]
struct UserClaim {
    user: User,
}

/// Newtype for the session token string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

#[cfg(feature = "graphql")]
async_graphql::scalar!(Token);

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Token {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Token {
    /// Decodes token claims
    ///
    /// Only the payload segment is inspected. Header and signature have to be present, but their
    /// content is not validated, and neither is the expiration time.
    pub fn claims(&self) -> Result<Claims, Error> {
        let payload = self.payload()?;
        serde_json::from_slice(&payload).map_err(Into::into)
    }

    /// Decodes the user carried by this token
    ///
    /// Only the user is required in the payload, the expiration time may be missing or malformed.
    pub fn decode(&self) -> Result<User, Error> {
        let payload = self.payload()?;
        let claim: UserClaim = serde_json::from_slice(&payload)?;
        Ok(claim.user)
    }

    /// Raw payload document
    fn payload(&self) -> Result<Vec<u8>, Error> {
        let segments: Vec<&str> = self.0.split(DELIMITER).collect();
        let [_header, payload, _signature] = segments[..] else {
            return Err(Error::SegmentCount {
                found: segments.len(),
            });
        };

        Ok(BASE64.decode(payload)?)
    }

    /// Consumes the token returning the raw string
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Builds session tokens
#[derive(Debug, Clone, Copy)]
pub struct Codec {
    /// How long issued tokens claim to be valid
    ttl: Duration,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Codec {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Encodes a token for the user, issued now
    pub fn encode(&self, user: User) -> Token {
        self.encode_at(user, Utc::now())
    }

    /// Encodes a token for the user, issued at the given time
    ///
    /// Expiration time saturates at the latest representable time.
    pub fn encode_at(&self, user: User, issued_at: DateTime<Utc>) -> Token {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let claims = Claims { user, expires_at };

        // Serializing plain structs with string keys into memory can't fail
        let header = serde_json::to_vec(&Header::default()).unwrap_or_default();
        let payload = serde_json::to_vec(&claims).unwrap_or_default();

        let header = BASE64.encode(header);
        let payload = BASE64.encode(payload);

        Token(format!(
            "{header}{DELIMITER}{payload}{DELIMITER}{SIGNATURE}"
        ))
    }
}

/// Decodes the user out of a raw token string
pub fn decode(token: &str) -> Result<User, Error> {
    Token::from(token).decode()
}
