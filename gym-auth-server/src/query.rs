//! Main query entry point

use async_graphql::Object;
use derivative::Derivative;

mod auth;

#[derive(Debug, Derivative)]
#[derivative(Default(new = "true"))]
pub struct Query {
    /// Authentication related queries
    auth: auth::AuthQueries,
}

#[Object]
impl Query {
    async fn auth(&self) -> &auth::AuthQueries {
        &self.auth
    }
}
