//! Route definitions for the `/posts` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /                      -> active_check
/// POST   /create_post           -> create_post (requires auth)
/// GET    /all_posts             -> list_posts
/// GET    /user_posts            -> list_user_posts (requires auth)
/// DELETE /delete_post           -> delete_post (requires auth)
/// POST   /like                  -> toggle_like (requires auth)
/// POST   /comment               -> add_comment (requires auth)
/// GET    /comments/{post_id}    -> list_comments
/// DELETE /delete_comment        -> delete_comment (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::active_check))
        .route("/create_post", post(posts::create_post))
        .route("/all_posts", get(posts::list_posts))
        .route("/user_posts", get(posts::list_user_posts))
        .route("/delete_post", delete(posts::delete_post))
        .route("/like", post(posts::toggle_like))
        .route("/comment", post(posts::add_comment))
        .route("/comments/{post_id}", get(posts::list_comments))
        .route("/delete_comment", delete(posts::delete_comment))
}
