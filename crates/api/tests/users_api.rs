//! HTTP-level tests for registration, sessions, and profiles.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, post_json, post_json_auth, register_user, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

async fn login(app: &axum::Router, email: &str, password: &str) -> axum::response::Response {
    post_json(
        app.clone(),
        "/api/users/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_token_and_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "name": "Alice",
        "username": "alice",
        "email": "Alice@Example.com",
        "password": TEST_PASSWORD,
    });

    let response = post_json(app, "/api/users/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["data"]["token"].is_string());
    assert_eq!(json["data"]["expires_in"], 3600);
    assert_eq!(json["data"]["user"]["username"], "alice");
    assert_eq!(json["data"]["user"]["email"], "alice@example.com");
    assert_eq!(json["data"]["user"]["profile_picture"], "default.jpg");
    assert!(json["data"]["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_with_missing_field_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "name": "Alice", "username": "alice", "password": TEST_PASSWORD });

    let response = post_json(app, "/api/users/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "All fields are required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_with_short_password_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "name": "Alice",
        "username": "alice",
        "email": "alice@example.com",
        "password": "short",
    });

    let response = post_json(app, "/api/users/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_username_or_email_is_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "alice").await;

    let same_username = json!({
        "name": "Other",
        "username": "alice",
        "email": "other@example.com",
        "password": TEST_PASSWORD,
    });
    let response = post_json(app.clone(), "/api/users/register", same_username).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let same_email = json!({
        "name": "Other",
        "username": "other",
        "email": "ALICE@example.com",
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/users/register", same_email).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_issues_working_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register_user(&app, "alice").await;

    let response = login(&app, "alice@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(json["data"]["user"]["id"], alice.id);
    assert_eq!(json["data"]["user"]["is_online"], true);

    let response = get_auth(app, "/api/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["username"], "alice");
    assert_eq!(json["data"]["profile"]["user_id"], alice.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_failures_share_one_message(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "alice").await;

    let wrong_password = login(&app, "alice@example.com", "wrong-password").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    let unknown_email = login(&app, "nobody@example.com", TEST_PASSWORD).await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email = body_json(unknown_email).await;

    assert_eq!(wrong_password["message"], unknown_email["message"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_login_revokes_previous_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register_user(&app, "alice").await;

    let response = login(&app, "alice@example.com", TEST_PASSWORD).await;
    let new_token = body_json(response).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(app.clone(), "/api/users/me", &alice.token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/users/me", &new_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register_user(&app, "alice").await;

    let response = post_json_auth(app.clone(), "/api/users/logout", &alice.token, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/users/me", &alice.token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn authed_route_without_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/users/me", "not-a-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_profile_replaces_lists_and_drops_blank_entries(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register_user(&app, "alice").await;

    let body = json!({
        "bio": "  Building things  ",
        "current_position": "Engineer",
        "past_work": [
            { "company": "Acme", "position": "Dev", "years": "2" },
            { "company": " ", "position": "", "years": null }
        ],
        "education": [{ "school": "MIT", "degree": "BSc", "field_of_study": "CS" }]
    });
    let response =
        post_json_auth(app.clone(), "/api/users/update_profile_data", &alice.token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["bio"], "Building things");
    assert_eq!(json["data"]["past_work"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["past_work"][0]["company"], "Acme");

    // Public profile read sees the update.
    let response = get(app, &format!("/api/users/profile/{}", alice.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["profile"]["current_position"], "Engineer");
    assert_eq!(json["data"]["profile"]["education"][0]["school"], "MIT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlong_current_position_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register_user(&app, "alice").await;

    let response = post_json_auth(
        app.clone(),
        "/api/users/update_profile_data",
        &alice.token,
        json!({ "current_position": "x".repeat(201) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // Nothing was written.
    let response = get(app, &format!("/api/users/profile/{}", alice.id)).await;
    let json = body_json(response).await;
    assert_ne!(json["data"]["profile"]["current_position"], "x".repeat(201));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_user_changes_name_and_rejects_taken_username(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register_user(&app, "alice").await;
    register_user(&app, "bob").await;

    let response = post_json_auth(
        app.clone(),
        "/api/users/user_update",
        &alice.token,
        json!({ "name": "Alice Liddell" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Alice Liddell");

    let response = post_json_auth(
        app,
        "/api/users/user_update",
        &alice.token,
        json!({ "username": "bob" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["message"], "Username is already taken");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn directory_lists_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register_user(&app, "alice").await;
    register_user(&app, "bob").await;

    let response = get_auth(app, "/api/users/all", &alice.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "bob");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_profile_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/users/profile/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}
