//! Repository for the `connection_requests` table.
//!
//! Listing queries join the user on the far side from the viewer and return
//! [`ConnectionView`]s, so callers never have to work out which endpoint is
//! "self".

use linkup_core::connection::{ConnectionStatus, LIVE_STATUSES, STATUS_ACCEPTED, STATUS_PENDING};
use linkup_core::types::DbId;
use sqlx::PgPool;

use crate::models::connection::{ConnectionRequest, ConnectionRow, ConnectionView};

const COLUMNS: &str =
    "id, requester_id, target_id, status, responded_at, created_at, updated_at";

/// Select list + join for caller-relative listings. `$1` is the viewer.
const VIEW_SELECT: &str = "SELECT c.id, c.requester_id, c.target_id, c.status, c.responded_at, c.created_at,
        u.id AS counterpart_id, u.name AS counterpart_name,
        u.username AS counterpart_username, u.profile_picture AS counterpart_profile_picture
 FROM connection_requests c
 JOIN users u ON u.id = CASE WHEN c.requester_id = $1 THEN c.target_id ELSE c.requester_id END";

pub struct ConnectionRepo;

impl ConnectionRepo {
    /// Insert a pending request.
    ///
    /// Returns `None` when a pending or accepted edge already exists for the
    /// pair (in either direction); the partial unique index
    /// `uq_connection_requests_live_pair` makes this race-free.
    pub async fn create(
        pool: &PgPool,
        requester_id: DbId,
        target_id: DbId,
    ) -> Result<Option<ConnectionRequest>, sqlx::Error> {
        let query = format!(
            "INSERT INTO connection_requests (requester_id, target_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConnectionRequest>(&query)
            .bind(requester_id)
            .bind(target_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ConnectionRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM connection_requests WHERE id = $1");
        sqlx::query_as::<_, ConnectionRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The pending or accepted edge between two users, in either direction.
    pub async fn find_live_between(
        pool: &PgPool,
        a: DbId,
        b: DbId,
    ) -> Result<Option<ConnectionRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM connection_requests
             WHERE ((requester_id = $1 AND target_id = $2) OR (requester_id = $2 AND target_id = $1))
               AND status = ANY($3)"
        );
        sqlx::query_as::<_, ConnectionRequest>(&query)
            .bind(a)
            .bind(b)
            .bind(LIVE_STATUSES)
            .fetch_optional(pool)
            .await
    }

    /// Move a pending request to `status`.
    ///
    /// Returns `None` if the request does not exist or is no longer pending.
    pub async fn respond(
        pool: &PgPool,
        id: DbId,
        status: ConnectionStatus,
    ) -> Result<Option<ConnectionRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE connection_requests
             SET status = $2, responded_at = NOW()
             WHERE id = $1 AND status = '{STATUS_PENDING}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConnectionRequest>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Pending requests addressed to `user_id`, newest first.
    pub async fn list_incoming(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ConnectionView>, sqlx::Error> {
        let query = format!(
            "{VIEW_SELECT}
             WHERE c.target_id = $1 AND c.status = '{STATUS_PENDING}'
             ORDER BY c.created_at DESC, c.id DESC"
        );
        Self::fetch_views(pool, user_id, &query).await
    }

    /// Pending requests sent by `user_id`, newest first.
    pub async fn list_outgoing(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ConnectionView>, sqlx::Error> {
        let query = format!(
            "{VIEW_SELECT}
             WHERE c.requester_id = $1 AND c.status = '{STATUS_PENDING}'
             ORDER BY c.created_at DESC, c.id DESC"
        );
        Self::fetch_views(pool, user_id, &query).await
    }

    /// Accepted connections touching `user_id`, most recently accepted first.
    pub async fn list_accepted(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ConnectionView>, sqlx::Error> {
        let query = format!(
            "{VIEW_SELECT}
             WHERE (c.requester_id = $1 OR c.target_id = $1) AND c.status = '{STATUS_ACCEPTED}'
             ORDER BY c.responded_at DESC NULLS LAST, c.id DESC"
        );
        Self::fetch_views(pool, user_id, &query).await
    }

    /// Whether an accepted edge exists between the two users in either
    /// direction.
    pub async fn are_connected(pool: &PgPool, a: DbId, b: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS (
                SELECT 1 FROM connection_requests
                WHERE ((requester_id = $1 AND target_id = $2) OR (requester_id = $2 AND target_id = $1))
                  AND status = '{STATUS_ACCEPTED}'
             )"
        );
        sqlx::query_scalar(&query)
            .bind(a)
            .bind(b)
            .fetch_one(pool)
            .await
    }

    /// Delete accepted edges between the pair in either direction.
    ///
    /// Returns the number of rows removed.
    pub async fn remove(pool: &PgPool, a: DbId, b: DbId) -> Result<u64, sqlx::Error> {
        let query = format!(
            "DELETE FROM connection_requests
             WHERE ((requester_id = $1 AND target_id = $2) OR (requester_id = $2 AND target_id = $1))
               AND status = '{STATUS_ACCEPTED}'"
        );
        let result = sqlx::query(&query)
            .bind(a)
            .bind(b)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn fetch_views(
        pool: &PgPool,
        viewer_id: DbId,
        query: &str,
    ) -> Result<Vec<ConnectionView>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ConnectionRow>(query)
            .bind(viewer_id)
            .fetch_all(pool)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| ConnectionView::for_viewer(viewer_id, row))
            .collect())
    }
}
