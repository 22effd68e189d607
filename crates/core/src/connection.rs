//! Connection-request statuses, transitions, and perspective helpers.
//!
//! A connection request is a directed edge `requester -> target`. Two users
//! are *connected* when an accepted edge exists between them in either
//! direction. Status values must match the `ck_connection_requests_status`
//! check constraint.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_REJECTED: &str = "rejected";

/// Statuses that occupy the single live slot for a user pair.
pub const LIVE_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_ACCEPTED];

/// Lifecycle of a connection request: `pending -> {accepted, rejected}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ConnectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionStatus::Pending => STATUS_PENDING,
            ConnectionStatus::Accepted => STATUS_ACCEPTED,
            ConnectionStatus::Rejected => STATUS_REJECTED,
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_PENDING => Ok(ConnectionStatus::Pending),
            STATUS_ACCEPTED => Ok(ConnectionStatus::Accepted),
            STATUS_REJECTED => Ok(ConnectionStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown connection status '{other}'"
            ))),
        }
    }

    /// Accepted and rejected are terminal.
    pub fn is_terminal(self) -> bool {
        !matches!(self, ConnectionStatus::Pending)
    }
}

/// The target's answer to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn resulting_status(self) -> ConnectionStatus {
        match self {
            Decision::Accept => ConnectionStatus::Accepted,
            Decision::Reject => ConnectionStatus::Rejected,
        }
    }
}

/// Which way an edge points relative to the viewing user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The viewer is the target.
    Incoming,
    /// The viewer is the requester.
    Outgoing,
}

/// Reject requests a user addresses to themself.
pub fn ensure_not_self(requester_id: DbId, target_id: DbId) -> Result<(), CoreError> {
    if requester_id == target_id {
        return Err(CoreError::Validation(
            "You cannot send a connection request to yourself".into(),
        ));
    }
    Ok(())
}

/// Check that `actor_id` may answer a request with the given endpoints and
/// current status, returning the status to write.
pub fn authorize_response(
    actor_id: DbId,
    target_id: DbId,
    current: ConnectionStatus,
    decision: Decision,
) -> Result<ConnectionStatus, CoreError> {
    if actor_id != target_id {
        return Err(CoreError::Unauthorized(
            "Only the recipient can respond to this connection request".into(),
        ));
    }
    if current.is_terminal() {
        return Err(CoreError::Conflict(format!(
            "Connection request was already {}",
            current.as_str()
        )));
    }
    Ok(decision.resulting_status())
}

/// The endpoint of `requester_id -> target_id` that is not `viewer_id`,
/// together with the edge direction from the viewer's side.
///
/// Returns `None` when the viewer is not an endpoint.
pub fn counterpart_of(
    viewer_id: DbId,
    requester_id: DbId,
    target_id: DbId,
) -> Option<(DbId, Direction)> {
    if viewer_id == requester_id {
        Some((target_id, Direction::Outgoing))
    } else if viewer_id == target_id {
        Some((requester_id, Direction::Incoming))
    } else {
        None
    }
}
