use axum::routing::{get, post};
use axum::Router;

use crate::handlers::status;
use crate::state::AppState;

/// Routes mounted at `/user-status`.
///
/// ```text
/// POST /update_status        -> update_status (requires auth)
/// GET  /status/{user_id}     -> get_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/update_status", post(status::update_status))
        .route("/status/{user_id}", get(status::get_status))
}
