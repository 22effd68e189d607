//! Route definitions for the `/chat` resource. All routes require auth.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// POST /send_message     -> send_message
/// POST /send_image       -> send_image
/// GET  /chat_history     -> chat_history (?other_user_id=)
/// GET  /chat_rooms       -> chat_rooms
/// POST /mark_as_read     -> mark_as_read
/// GET  /unread_count     -> unread_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send_message", post(chat::send_message))
        .route("/send_image", post(chat::send_image))
        .route("/chat_history", get(chat::chat_history))
        .route("/chat_rooms", get(chat::chat_rooms))
        .route("/mark_as_read", post(chat::mark_as_read))
        .route("/unread_count", get(chat::unread_count))
}
