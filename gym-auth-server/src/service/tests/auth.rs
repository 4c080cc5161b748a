//! Authentication related API tests

use actix_web::{App, test};
use serde_json::json;

use crate::service::tests::{GraphQLResp, call, gql, test_service};

const LOGIN: &str = r#"mutation($email: String!, $password: String!) {
        auth {
            login(email: $email, password: $password) {
                token
                user { id email name membershipType joinDate }
            }
        }
    }"#;

const VERIFY: &str = r#"query($token: Token!) {
        auth {
            verify(token: $token) { email membershipType }
        }
    }"#;

const CURRENT_USER: &str = r#"query {
        auth {
            currentUser { email }
            authenticated
        }
    }"#;

#[actix_web::test]
async fn login_and_verify() {
    let app = test::init_service(App::new().configure(test_service())).await;

    let resp: GraphQLResp = call(
        &app,
        gql(LOGIN, json!({ "email": "a@b.com", "password": "pw" })),
        None,
    )
    .await;

    assert_eq!(resp.errors, None);
    let token = resp.data::<String>("auth.login.token").unwrap();
    assert_eq!(token.split('.').count(), 3);
    assert_eq!(
        resp.data::<String>("auth.login.user.email").unwrap(),
        "a@b.com"
    );
    assert_eq!(resp.data::<String>("auth.login.user.id").unwrap(), "1");
    assert_eq!(
        resp.data::<String>("auth.login.user.membershipType").unwrap(),
        "PREMIUM"
    );
    assert_eq!(
        resp.data::<String>("auth.login.user.joinDate").unwrap(),
        "2024-01-01"
    );

    let resp = call(&app, gql(VERIFY, json!({ "token": token })), None).await;
    assert_eq!(resp.errors, None);
    assert_eq!(
        resp.data::<String>("auth.verify.email").unwrap(),
        "a@b.com"
    );
    assert_eq!(
        resp.data::<String>("auth.verify.membershipType").unwrap(),
        "PREMIUM"
    );
}

#[actix_web::test]
async fn login_with_failure_password() {
    let app = test::init_service(App::new().configure(test_service())).await;

    let resp = call(
        &app,
        gql(LOGIN, json!({ "email": "a@b.com", "password": "error" })),
        None,
    )
    .await;

    assert_eq!(resp.error_message(), Some("Invalid credentials"));
    resp.data::<String>("auth.login.token").unwrap_err();
}

#[actix_web::test]
async fn verify_malformed_token() {
    let app = test::init_service(App::new().configure(test_service())).await;

    for token in ["garbage", "only.two"] {
        let resp = call(&app, gql(VERIFY, json!({ "token": token })), None).await;
        assert_eq!(resp.error_message(), Some("Invalid token"), "{token}");
    }
}

#[actix_web::test]
async fn current_user_from_bearer_token() {
    let app = test::init_service(App::new().configure(test_service())).await;

    let resp = call(
        &app,
        gql(LOGIN, json!({ "email": "a@b.com", "password": "pw" })),
        None,
    )
    .await;
    let token = resp.data::<String>("auth.login.token").unwrap();

    let resp = call(&app, gql(CURRENT_USER, json!({})), Some(&token)).await;
    assert_eq!(resp.errors, None);
    assert_eq!(
        resp.data::<String>("auth.currentUser.email").unwrap(),
        "a@b.com"
    );
    assert!(resp.data::<bool>("auth.authenticated").unwrap());

    // No token
    let resp = call(&app, gql(CURRENT_USER, json!({})), None).await;
    assert_eq!(resp.errors, None);
    assert_eq!(
        resp.data::<Option<String>>("auth.currentUser").unwrap(),
        None
    );
    assert!(!resp.data::<bool>("auth.authenticated").unwrap());

    // Garbage token is no user, not an error
    let resp = call(&app, gql(CURRENT_USER, json!({})), Some("garbage")).await;
    assert_eq!(resp.errors, None);
    assert_eq!(
        resp.data::<Option<String>>("auth.currentUser").unwrap(),
        None
    );
    assert!(!resp.data::<bool>("auth.authenticated").unwrap());
}

#[actix_web::test]
async fn unsupported_authorization_scheme_is_ignored() {
    let app = test::init_service(App::new().configure(test_service())).await;

    let resp: GraphQLResp = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api")
            .insert_header(("content-type", "application/json"))
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .set_payload(gql(CURRENT_USER, json!({})))
            .to_request(),
    )
    .await;

    assert_eq!(resp.errors, None);
    assert!(!resp.data::<bool>("auth.authenticated").unwrap());
}

#[actix_web::test]
async fn logout_has_no_effect() {
    let app = test::init_service(App::new().configure(test_service())).await;

    let resp = call(
        &app,
        gql(LOGIN, json!({ "email": "a@b.com", "password": "pw" })),
        None,
    )
    .await;
    let token = resp.data::<String>("auth.login.token").unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/session")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let resp = call(
        &app,
        gql("mutation { auth { logout } }", json!({})),
        Some(&token),
    )
    .await;
    assert_eq!(resp.errors, None);
    assert!(resp.data::<bool>("auth.logout").unwrap());

    let resp = call(&app, gql(CURRENT_USER, json!({})), Some(&token)).await;
    assert!(resp.data::<bool>("auth.authenticated").unwrap());
}
