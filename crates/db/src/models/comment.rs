//! Comment entity model and read model.

use linkup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: DbId,
    pub post_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub author_id: DbId,
    pub author_name: String,
    pub author_username: String,
    pub author_profile_picture: String,
}

/// A comment with its author attached.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: DbId,
    pub post_id: DbId,
    pub body: String,
    pub author: UserSummary,
    pub created_at: Timestamp,
}

impl From<CommentRow> for CommentView {
    fn from(row: CommentRow) -> Self {
        CommentView {
            id: row.id,
            post_id: row.post_id,
            body: row.body,
            author: UserSummary {
                id: row.author_id,
                name: row.author_name,
                username: row.author_username,
                profile_picture: row.author_profile_picture,
            },
            created_at: row.created_at,
        }
    }
}
