pub mod chat;
pub mod health;
pub mod posts;
pub mod status;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /users/...          accounts, sessions, profiles, connections
/// /posts/...          posts, likes, comments
/// /chat/...           direct messages
/// /user-status/...    online status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/posts", posts::router())
        .nest("/chat", chat::router())
        .nest("/user-status", status::router())
}
