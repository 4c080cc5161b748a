//! Utilities for services building

use actix_web::web::{Data, ServiceConfig};
use actix_web::{HttpMessage, delete, middleware};
use actix_web::{HttpRequest, HttpResponse, Result, get, post, web};
use async_graphql::EmptySubscription;
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};


pub mod session;

use crate::model::Model;
use crate::mutation::Mutation;
use crate::query::Query;
use session::ClientStorage;

/// Root GraphQL schema
pub type Schema = async_graphql::Schema<Query, Mutation, EmptySubscription>;

/// Closes current session. Tokens are never revoked, so it has no effect.
#[delete("/session")]
async fn logout(model: Data<Model>) -> HttpResponse {
    model.auth().logout().await;
    HttpResponse::NoContent().finish()
}

/// ActixWeb GraphQL endpoint
#[post("/api")]
async fn api(
    schema: web::Data<Schema>,
    req: HttpRequest,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();
    if let Some(storage) = req.extensions_mut().remove::<ClientStorage>() {
        request = request.data(storage);
    }
    schema.execute(request).await.into()
}

/// ActixWeb GraphQLi endpoint
#[get("/pg")]
async fn graphiql() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/api").finish()))
}

/// Returns configuration function for the ActixWeb services
pub fn configure(graphiql_enabled: bool, model: Model) -> impl Fn(&mut ServiceConfig) + Clone {
    move |cfg: &mut ServiceConfig| {
        if graphiql_enabled {
            cfg.service(graphiql);
        }

        let session_aware = {
            web::scope("")
                .wrap(middleware::from_fn(session::middleware))
                .service(api)
                .service(logout)
        };

        cfg.app_data(Data::new(model.schema()))
            .app_data(Data::new(model.clone()))
            .service(session_aware);
    }
}
