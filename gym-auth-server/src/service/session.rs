//! Client session token handling
//!
//! The session token a client keeps in its persisted storage is sent with every request in the
//! `Authorization: Bearer [token]` header. The header is exposed to resolvers as the client
//! storage, so the regular session lookup works on it.

use std::str::FromStr;

use actix_web::HttpMessage;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use gym_auth::Token;
use gym_auth::storage::{self, SessionStorage, TOKEN_KEY};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid authorization format")]
    InvalidAuthorization,
    #[error("Invalid authorization scheme")]
    InvalidAuthorizationScheme,
}

/// Authentication method based on `Authorization` HTTP header
#[derive(Debug, Clone)]
pub enum Authorization {
    /// Session token
    Bearer(Token),
}

impl FromStr for Authorization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, token) = s.split_once(' ').ok_or(Error::InvalidAuthorization)?;

        match scheme {
            "Bearer" => Ok(Self::Bearer(Token::from(token.trim()))),
            _ => Err(Error::InvalidAuthorizationScheme),
        }
    }
}

/// Client storage as seen through the request headers
#[derive(Debug, Clone, Default)]
pub enum ClientStorage {
    /// No token sent
    #[default]
    Empty,
    /// Token sent
    Token(Token),
    /// Header which cannot be interpreted
    Unreadable(String),
}

impl ClientStorage {
    /// Builds the storage out of the `Authorization` header value
    fn from_header(value: Option<&header::HeaderValue>) -> Self {
        let Some(value) = value else {
            return Self::Empty;
        };

        let authorization = value
            .to_str()
            .map_err(|_| Error::InvalidAuthorization)
            .and_then(Authorization::from_str);

        match authorization {
            Ok(Authorization::Bearer(token)) => Self::Token(token),
            Err(err) => {
                debug!(%err, "Ignoring Authorization header");
                Self::Unreadable(err.to_string())
            }
        }
    }

    /// Client storage attached to the GraphQL request
    pub fn from_context(ctx: &async_graphql::Context<'_>) -> Self {
        ctx.data_opt::<Self>().cloned().unwrap_or_default()
    }
}

impl SessionStorage for ClientStorage {
    fn read(&self, key: &str) -> Result<Option<String>, storage::Error> {
        match self {
            Self::Token(token) if key == TOKEN_KEY => Ok(Some(token.to_string())),
            Self::Token(_) | Self::Empty => Ok(None),
            Self::Unreadable(reason) => Err(storage::Error::Unavailable(reason.clone())),
        }
    }
}

/// Attaches client storage to the request
pub async fn middleware<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, actix_web::Error>
where
    B: MessageBody + 'static,
{
    let storage = ClientStorage::from_header(req.headers().get(header::AUTHORIZATION));
    req.extensions_mut().insert(storage);
    next.call(req).await
}
