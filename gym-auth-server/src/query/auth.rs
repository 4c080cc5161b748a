//! Authentication related queries

use async_graphql::{Context, Object, Result};
use gym_auth::{Token, User};
use tracing::instrument;

use crate::model::Model;
use crate::service::session::ClientStorage;

#[derive(Debug, Default)]
pub struct AuthQueries;

#[Object]
impl AuthQueries {
    /// Verifies the session token, returning the user it was issued for. Fails if the token is
    /// malformed. Token expiration is not checked.
    #[instrument(skip_all)]
    async fn verify(&self, ctx: &Context<'_>, token: Token) -> Result<User> {
        let model: &Model = ctx.data()?;
        let user = model.auth().verify(&token).await?;
        Ok(user)
    }

    /// User of the session token sent in the `Authorization: Bearer [token]` header. Missing or
    /// invalid token results in no user.
    async fn current_user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let model: &Model = ctx.data()?;
        let storage = ClientStorage::from_context(ctx);
        Ok(model.auth().current_user(&storage))
    }

    /// Checks if a valid session token is sent in the `Authorization` header
    async fn authenticated(&self, ctx: &Context<'_>) -> Result<bool> {
        let model: &Model = ctx.data()?;
        let storage = ClientStorage::from_context(ctx);
        Ok(model.auth().is_authenticated(&storage))
    }
}
