//! Shared helpers for HTTP integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use linkup_api::auth::jwt::JwtConfig;
use linkup_api::config::ServerConfig;
use linkup_api::router::build_app_router;
use linkup_api::state::AppState;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "pw123456";

/// A `ServerConfig` with fixed secrets and the default presence timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        presence_timeout_secs: 120,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the production router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, &body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), &body)).await
}

pub async fn delete_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::DELETE, uri, Some(token), &body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// A registered user and their current token.
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

/// Register `username` through the API and return its id and token.
pub async fn register_user(app: &Router, username: &str) -> TestUser {
    let body = json!({
        "name": format!("{username} test"),
        "username": username,
        "email": format!("{username}@example.com"),
        "password": TEST_PASSWORD,
    });
    let response = post_json(app.clone(), "/api/users/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    TestUser {
        id: json["data"]["user"]["id"].as_i64().expect("user id"),
        token: json["data"]["token"].as_str().expect("token").to_string(),
    }
}

/// Make `a` and `b` connected through the request/accept flow.
pub async fn connect(app: &Router, a: &TestUser, b: &TestUser) {
    let response = post_json_auth(
        app.clone(),
        "/api/users/send_connection_request",
        &a.token,
        json!({ "target_id": b.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let request_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/users/respond_connection_request",
        &b.token,
        json!({ "request_id": request_id, "action": "accept" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
