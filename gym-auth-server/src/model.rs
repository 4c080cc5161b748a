//! Service global model

use std::sync::Arc;

use async_graphql::EmptySubscription;
use gym_auth::{AuthConfig, MockAuth};

use crate::mutation::Mutation;
use crate::query::Query;
use crate::service::Schema;

/// Context for GraphQL schema
#[derive(Clone)]
pub struct Model {
    /// Mocked authentication backend
    auth: Arc<MockAuth>,
}

impl Model {
    /// Model for testing purposes - default behaviour, but without simulated latency
    #[cfg(test)]
    pub fn test() -> Self {
        Self::with_config(AuthConfig::instant())
    }

    /// Model from configuration
    pub fn with_config(config: AuthConfig) -> Self {
        let auth = MockAuth::with_config(config, Default::default());
        Self {
            auth: Arc::new(auth),
        }
    }

    /// Buids schema with attached model
    pub fn schema(&self) -> Schema {
        Schema::build(Query::new(), Mutation::new(), EmptySubscription)
            .data(self.clone())
            .finish()
    }

    /// Accesses the authentication backend
    pub fn auth(&self) -> &MockAuth {
        &self.auth
    }
}
