//! HTTP-level tests for online status.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json_auth, register_user};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn heartbeat_updates_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = register_user(&app, "alice").await;

    let response = post_json_auth(
        app.clone(),
        "/api/user-status/update_status",
        &alice.token,
        json!({ "is_online": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_online"], false);

    post_json_auth(
        app.clone(),
        "/api/user-status/update_status",
        &alice.token,
        json!({ "is_online": true }),
    )
    .await;

    let response = get(app, &format!("/api/user-status/status/{}", alice.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], alice.id);
    assert_eq!(json["data"]["username"], "alice");
    assert_eq!(json["data"]["is_online"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_heartbeat_reads_offline(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let alice = register_user(&app, "alice").await;

    sqlx::query(
        "UPDATE users SET is_online = true, last_seen = NOW() - INTERVAL '10 minutes' WHERE id = $1",
    )
    .bind(alice.id)
    .execute(&pool)
    .await
    .unwrap();

    let response = get(app, &format!("/api/user-status/status/{}", alice.id)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_online"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_of_unknown_user_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/user-status/status/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
