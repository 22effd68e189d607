//! Handlers for posts, likes, and comments under `/posts`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use linkup_core::error::CoreError;
use linkup_core::post::{
    can_delete_comment, ensure_post_author, validate_comment_body, validate_media,
    validate_post_body,
};
use linkup_core::types::{DbId, Timestamp};
use linkup_db::models::comment::{Comment, CommentView};
use linkup_db::models::post::{CreatePost, LikeToggle, Post, PostView};
use linkup_db::repositories::{CommentRepo, PostRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /posts/create_post`.
///
/// `media` names a file already stored by the client; its coarse type is
/// derived from the extension.
#[derive(Debug, Deserialize)]
pub struct CreatePostBody {
    #[serde(default)]
    pub body: String,
    pub media: Option<String>,
}

/// Body for endpoints that act on a single post.
#[derive(Debug, Deserialize)]
pub struct PostIdBody {
    pub post_id: DbId,
}

/// Request body for `POST /posts/comment`.
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub post_id: DbId,
    #[serde(default)]
    pub body: String,
}

/// Request body for `DELETE /posts/delete_comment`.
#[derive(Debug, Deserialize)]
pub struct DeleteCommentBody {
    pub post_id: DbId,
    pub comment_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct ActiveCheck {
    pub timestamp: Timestamp,
}

/// Query parameters for `GET /posts/user_posts`.
#[derive(Debug, Deserialize)]
pub struct UserPostsQuery {
    /// Defaults to the caller.
    pub user_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/posts
///
/// Liveness of the posts area, stamped with the server clock.
pub async fn active_check() -> Json<ApiResponse<ActiveCheck>> {
    Json(ApiResponse::new(
        "Active",
        ActiveCheck {
            timestamp: Utc::now(),
        },
    ))
}

/// POST /api/posts/create_post
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreatePostBody>,
) -> AppResult<(StatusCode, Json<ApiResponse<PostView>>)> {
    let body = validate_post_body(&input.body)?;
    let media = validate_media(input.media.as_deref())?;

    let post = PostRepo::create(
        &state.pool,
        &CreatePost {
            author_id: auth.user_id,
            body,
            media,
        },
    )
    .await?;

    let view = PostRepo::find_view(&state.pool, post.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Post", post.id)))?;

    tracing::info!(post_id = post.id, author_id = auth.user_id, "Post created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Post created successfully", view)),
    ))
}

/// GET /api/posts/all_posts
///
/// Active posts, newest first.
pub async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<PostView>>>> {
    let posts = PostRepo::list_active(&state.pool).await?;
    Ok(Json(ApiResponse::new("Posts fetched successfully", posts)))
}

/// GET /api/posts/user_posts?user_id=
pub async fn list_user_posts(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(query): AppQuery<UserPostsQuery>,
) -> AppResult<Json<ApiResponse<Vec<PostView>>>> {
    let author_id = query.user_id.unwrap_or(auth.user_id);
    let posts = PostRepo::list_by_author(&state.pool, author_id).await?;
    Ok(Json(ApiResponse::new("Posts fetched successfully", posts)))
}

/// DELETE /api/posts/delete_post
///
/// Soft delete: the post drops out of every listing but its likes and
/// comments are kept.
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<PostIdBody>,
) -> AppResult<Json<ApiResponse<()>>> {
    let post = load_active_post(&state, input.post_id).await?;
    ensure_post_author(auth.user_id, post.author_id)?;

    if !PostRepo::soft_delete(&state.pool, post.id).await? {
        return Err(AppError::Core(CoreError::not_found("Post", post.id)));
    }

    tracing::info!(post_id = post.id, "Post deleted");
    Ok(Json(ApiResponse::new("Post deleted successfully", ())))
}

/// POST /api/posts/like
///
/// Toggles the caller's like.
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<PostIdBody>,
) -> AppResult<Json<ApiResponse<LikeToggle>>> {
    let toggle = PostRepo::toggle_like(&state.pool, input.post_id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Post", input.post_id)))?;

    tracing::debug!(
        post_id = input.post_id,
        user_id = auth.user_id,
        liked = toggle.liked,
        "Like toggled"
    );
    let message = if toggle.liked { "Post liked" } else { "Post unliked" };
    Ok(Json(ApiResponse::new(message, toggle)))
}

/// POST /api/posts/comment
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CommentBody>,
) -> AppResult<(StatusCode, Json<ApiResponse<Comment>>)> {
    let body = validate_comment_body(&input.body)?;
    let post = load_active_post(&state, input.post_id).await?;

    let comment = CommentRepo::create(&state.pool, post.id, auth.user_id, &body).await?;

    tracing::info!(comment_id = comment.id, post_id = post.id, "Comment added");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Comment added successfully", comment)),
    ))
}

/// GET /api/posts/comments/{post_id}
///
/// Oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    AppPath(post_id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Vec<CommentView>>>> {
    let post = load_active_post(&state, post_id).await?;
    let comments = CommentRepo::list_for_post(&state.pool, post.id).await?;
    Ok(Json(ApiResponse::new("Comments fetched successfully", comments)))
}

/// DELETE /api/posts/delete_comment
///
/// Allowed for the comment's author and the post's author.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<DeleteCommentBody>,
) -> AppResult<Json<ApiResponse<()>>> {
    let comment = CommentRepo::find_by_id(&state.pool, input.comment_id)
        .await?
        .filter(|c| c.post_id == input.post_id)
        .ok_or_else(|| AppError::Core(CoreError::not_found("Comment", input.comment_id)))?;

    let post = load_active_post(&state, comment.post_id).await?;

    if !can_delete_comment(auth.user_id, comment.author_id, post.author_id) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "You are not allowed to delete this comment".into(),
        )));
    }

    if !CommentRepo::delete(&state.pool, comment.id).await? {
        return Err(AppError::Core(CoreError::not_found("Comment", comment.id)));
    }

    tracing::info!(comment_id = comment.id, post_id = post.id, "Comment deleted");
    Ok(Json(ApiResponse::new("Comment deleted successfully", ())))
}

async fn load_active_post(state: &AppState, post_id: DbId) -> AppResult<Post> {
    PostRepo::find_active(&state.pool, post_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Post", post_id)))
}
