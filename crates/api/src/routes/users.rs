//! Route definitions for the `/users` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{connections, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /register                     -> register
/// POST   /login                        -> login
/// POST   /logout                       -> logout (requires auth)
/// GET    /me                           -> me (requires auth)
/// GET    /all                          -> list_users (requires auth)
/// GET    /profile/{user_id}            -> get_profile
/// POST   /user_update                  -> update_user (requires auth)
/// POST   /update_profile_data          -> update_profile (requires auth)
/// POST   /send_connection_request      -> send_request (requires auth)
/// POST   /respond_connection_request   -> respond_request (requires auth)
/// GET    /my_connection_requests       -> list_incoming (requires auth)
/// GET    /sent_connection_requests     -> list_outgoing (requires auth)
/// GET    /my_connections               -> list_connections (requires auth)
/// DELETE /remove_connection            -> remove_connection (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
        .route("/me", get(users::me))
        .route("/all", get(users::list_users))
        .route("/profile/{user_id}", get(users::get_profile))
        .route("/user_update", post(users::update_user))
        .route("/update_profile_data", post(users::update_profile))
        .route("/send_connection_request", post(connections::send_request))
        .route(
            "/respond_connection_request",
            post(connections::respond_request),
        )
        .route("/my_connection_requests", get(connections::list_incoming))
        .route("/sent_connection_requests", get(connections::list_outgoing))
        .route("/my_connections", get(connections::list_connections))
        .route("/remove_connection", delete(connections::remove_connection))
}
