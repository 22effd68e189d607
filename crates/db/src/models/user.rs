//! Account rows and the shapes they are exposed in.

use linkup_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A `users` row. Holds the password hash and session id, so it is not
/// `Serialize`; handlers convert it to [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture: String,
    pub session_id: Option<Uuid>,
    pub is_online: bool,
    pub last_seen: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Account as shown to its owner and in profile lookups.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
    pub is_online: bool,
    pub last_seen: Timestamp,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            profile_picture: user.profile_picture,
            is_online: user.is_online,
            last_seen: user.last_seen,
            created_at: user.created_at,
        }
    }
}

/// The public face of a user embedded in posts, comments, connections, and
/// chat rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub username: String,
    pub profile_picture: String,
}

/// Row shape for online-status lookups.
#[derive(Debug, Clone, FromRow)]
pub struct UserStatusRow {
    pub id: DbId,
    pub name: String,
    pub username: String,
    pub profile_picture: String,
    pub is_online: bool,
    pub last_seen: Timestamp,
}

/// Insert shape; `password_hash` is an Argon2 PHC string.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub username: Option<String>,
}
