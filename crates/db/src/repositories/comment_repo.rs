//! Repository for the `comments` table.

use linkup_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentRow, CommentView};

const COLUMNS: &str = "id, post_id, author_id, body, created_at";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(
        pool: &PgPool,
        post_id: DbId,
        author_id: DbId,
        body: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (post_id, author_id, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(post_id)
            .bind(author_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Comments on a post with their authors, oldest first.
    pub async fn list_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<CommentView>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT c.id, c.post_id, c.body, c.created_at,
                    u.id AS author_id, u.name AS author_name,
                    u.username AS author_username, u.profile_picture AS author_profile_picture
             FROM comments c
             JOIN users u ON u.id = c.author_id
             WHERE c.post_id = $1
             ORDER BY c.created_at, c.id",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(CommentView::from).collect())
    }

    /// Hard-delete a comment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
