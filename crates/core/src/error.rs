//! Domain error taxonomy shared by every LinkUp crate.

use crate::types::DbId;

/// Errors raised by domain validation and authorization checks.
///
/// The API layer maps each variant to one HTTP status; see
/// `linkup_api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A user, post, comment, or connection request does not exist (or is
    /// soft-deleted).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A required text field is empty or malformed.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Duplicate registration, duplicate connection request, or a state
    /// transition out of a terminal status.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials, or the actor lacks rights over the
    /// target resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The actor is authenticated but the relation required for the action
    /// (e.g. an accepted connection) does not exist.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}
