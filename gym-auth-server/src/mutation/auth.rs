//! Authentication related mutations

use async_graphql::{Context, Object, Result};
use gym_auth::Login;
use tracing::instrument;

use crate::model::Model;

#[derive(Debug, Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Logs in with any credentials, returning the session token and the logged in user.
    ///
    /// Fails only for the configured failure password.
    #[instrument(skip(self, ctx, password))]
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<Login> {
        let model: &Model = ctx.data()?;
        let login = model.auth().login(&email, &password).await?;
        Ok(login)
    }

    /// Logs out. Tokens are never revoked, so this always succeeds and has no effect.
    async fn logout(&self, ctx: &Context<'_>) -> Result<bool> {
        let model: &Model = ctx.data()?;
        model.auth().logout().await;
        Ok(true)
    }
}
