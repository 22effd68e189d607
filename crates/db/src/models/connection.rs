//! Connection-request entity model and the caller-relative read model.

use linkup_core::connection::{counterpart_of, Direction};
use linkup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `connection_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConnectionRequest {
    pub id: DbId,
    pub requester_id: DbId,
    pub target_id: DbId,
    pub status: String,
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Connection request joined with the user on the far side from the viewer.
#[derive(Debug, Clone, FromRow)]
pub struct ConnectionRow {
    pub id: DbId,
    pub requester_id: DbId,
    pub target_id: DbId,
    pub status: String,
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub counterpart_id: DbId,
    pub counterpart_name: String,
    pub counterpart_username: String,
    pub counterpart_profile_picture: String,
}

/// A connection or request as seen by one of its endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionView {
    pub id: DbId,
    pub status: String,
    pub direction: Direction,
    pub counterpart: UserSummary,
    pub created_at: Timestamp,
    pub responded_at: Option<Timestamp>,
}

impl ConnectionView {
    /// Build the view for `viewer_id`. Returns `None` if the viewer is not an
    /// endpoint of the row.
    pub fn for_viewer(viewer_id: DbId, row: ConnectionRow) -> Option<Self> {
        let (_, direction) = counterpart_of(viewer_id, row.requester_id, row.target_id)?;
        Some(ConnectionView {
            id: row.id,
            status: row.status,
            direction,
            counterpart: UserSummary {
                id: row.counterpart_id,
                name: row.counterpart_name,
                username: row.counterpart_username,
                profile_picture: row.counterpart_profile_picture,
            },
            created_at: row.created_at,
            responded_at: row.responded_at,
        })
    }
}
