//! Accounts, sessions, and presence, all stored on `users`.

use linkup_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{CreateUser, UpdateUser, User, UserStatusRow};

/// Every column of [`User`], in struct order.
const COLUMNS: &str = "id, name, username, email, password_hash, profile_picture, \
                       session_id, is_online, last_seen, created_at, updated_at";

const STATUS_COLUMNS: &str = "id, name, username, profile_picture, is_online, last_seen";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user and its empty profile in one transaction, returning
    /// the created user row.
    pub async fn create_with_profile(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (name, username, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by (already normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Whether any user already holds `username` or `email`.
    pub async fn exists_by_username_or_email(
        pool: &PgPool,
        username: &str,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(pool)
        .await
    }

    /// Rename and/or change username; `None` fields keep their value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                username = COALESCE($3, username)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.username)
            .fetch_optional(pool)
            .await
    }

    /// Replace the user's session id, invalidating any previously issued
    /// token, and mark them online.
    pub async fn start_session(
        pool: &PgPool,
        id: DbId,
        session_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET session_id = $2, is_online = true, last_seen = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(session_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Clear the session id and mark the user offline.
    ///
    /// Returns `true` if a session was cleared.
    pub async fn end_session(
        pool: &PgPool,
        id: DbId,
        session_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET session_id = NULL, is_online = false, last_seen = NOW()
             WHERE id = $1 AND session_id = $2",
        )
        .bind(id)
        .bind(session_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether `session_id` is the user's current session.
    pub async fn has_session(
        pool: &PgPool,
        id: DbId,
        session_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1 AND session_id = $2)")
            .bind(id)
            .bind(session_id)
            .fetch_one(pool)
            .await
    }

    /// Heartbeat. `last_seen` moves forward even when going offline.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        is_online: bool,
    ) -> Result<Option<UserStatusRow>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET is_online = $2, last_seen = NOW()
             WHERE id = $1
             RETURNING {STATUS_COLUMNS}"
        );
        sqlx::query_as::<_, UserStatusRow>(&query)
            .bind(id)
            .bind(is_online)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the presence fields for a user.
    pub async fn find_status(pool: &PgPool, id: DbId) -> Result<Option<UserStatusRow>, sqlx::Error> {
        let query = format!("SELECT {STATUS_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserStatusRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
