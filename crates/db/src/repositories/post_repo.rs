//! Repository for the `posts` and `post_likes` tables.

use linkup_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, LikeToggle, Post, PostRow, PostView};

const COLUMNS: &str = "id, author_id, body, media, file_type, is_active, created_at, updated_at";

/// Feed projection: the post, its author, the like-set and comment count.
const VIEW_SELECT: &str = "SELECT p.id, p.author_id, p.body, p.media, p.file_type, p.created_at, p.updated_at,
        u.name AS author_name, u.username AS author_username,
        u.profile_picture AS author_profile_picture,
        ARRAY(SELECT l.user_id FROM post_likes l WHERE l.post_id = p.id
              ORDER BY l.created_at, l.user_id) AS liked_by,
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
 FROM posts p
 JOIN users u ON u.id = p.author_id";

pub struct PostRepo;

impl PostRepo {
    /// Insert a post, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let (media, file_type) = match &input.media {
            Some((name, kind)) => (Some(name.as_str()), Some(kind.as_str())),
            None => (None, None),
        };
        let query = format!(
            "INSERT INTO posts (author_id, body, media, file_type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(input.author_id)
            .bind(&input.body)
            .bind(media)
            .bind(file_type)
            .fetch_one(pool)
            .await
    }

    /// Find an active (not soft-deleted) post.
    pub async fn find_active(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1 AND is_active");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Feed view of a single active post.
    pub async fn find_view(pool: &PgPool, id: DbId) -> Result<Option<PostView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} WHERE p.id = $1 AND p.is_active");
        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(PostView::from))
    }

    /// All active posts, newest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<PostView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} WHERE p.is_active ORDER BY p.created_at DESC, p.id DESC");
        let rows = sqlx::query_as::<_, PostRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(PostView::from).collect())
    }

    /// Active posts by one author, newest first.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
    ) -> Result<Vec<PostView>, sqlx::Error> {
        let query = format!(
            "{VIEW_SELECT} WHERE p.author_id = $1 AND p.is_active
             ORDER BY p.created_at DESC, p.id DESC"
        );
        let rows = sqlx::query_as::<_, PostRow>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(PostView::from).collect())
    }

    /// Soft-delete a post by clearing `is_active`. Likes and comments are
    /// left in place.
    ///
    /// Returns `true` if an active row was deactivated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE posts SET is_active = false WHERE id = $1 AND is_active")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip `user_id`'s membership in the post's like-set.
    ///
    /// Returns `None` if the post is missing or inactive. The count is
    /// recomputed from the set after the flip.
    pub async fn toggle_like(
        pool: &PgPool,
        post_id: DbId,
        user_id: DbId,
    ) -> Result<Option<LikeToggle>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let active: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM posts WHERE id = $1 AND is_active FOR SHARE")
                .bind(post_id)
                .fetch_optional(&mut *tx)
                .await?;
        if active.is_none() {
            return Ok(None);
        }

        let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let liked = if removed == 0 {
            sqlx::query(
                "INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
            true
        } else {
            false
        };

        let like_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(LikeToggle { liked, like_count }))
    }
}
