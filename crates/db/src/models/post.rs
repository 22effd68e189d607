//! Post entity model, DTOs, and feed read model.

use linkup_core::post::MediaKind;
use linkup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub media: Option<String>,
    pub file_type: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a post. Body and media are expected to be validated.
#[derive(Debug)]
pub struct CreatePost {
    pub author_id: DbId,
    pub body: String,
    pub media: Option<(String, MediaKind)>,
}

/// Post joined with its author, like-set, and comment count.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub media: Option<String>,
    pub file_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_name: String,
    pub author_username: String,
    pub author_profile_picture: String,
    pub liked_by: Vec<DbId>,
    pub comment_count: i64,
}

/// A post as rendered in feeds.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: DbId,
    pub body: String,
    pub media: Option<String>,
    pub file_type: Option<String>,
    pub author: UserSummary,
    pub like_count: i64,
    pub liked_by: Vec<DbId>,
    pub comment_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PostRow> for PostView {
    fn from(row: PostRow) -> Self {
        PostView {
            id: row.id,
            body: row.body,
            media: row.media,
            file_type: row.file_type,
            author: UserSummary {
                id: row.author_id,
                name: row.author_name,
                username: row.author_username,
                profile_picture: row.author_profile_picture,
            },
            like_count: row.liked_by.len() as i64,
            liked_by: row.liked_by,
            comment_count: row.comment_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Result of flipping a user's like on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeToggle {
    pub liked: bool,
    pub like_count: i64,
}
