//! Profile entity model and DTOs.

use linkup_core::profile::{EducationEntry, WorkEntry};
use linkup_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::user::UserResponse;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub bio: Option<String>,
    pub current_position: Option<String>,
    pub past_work: Json<Vec<WorkEntry>>,
    pub education: Json<Vec<EducationEntry>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating a profile. `None` leaves a field unchanged; a supplied
/// list replaces the stored list.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub current_position: Option<String>,
    pub past_work: Option<Vec<WorkEntry>>,
    pub education: Option<Vec<EducationEntry>>,
}

/// A user together with their profile.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithProfile {
    pub user: UserResponse,
    pub profile: Profile,
}

/// One entry of the user directory.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DirectoryEntry {
    pub id: DbId,
    pub name: String,
    pub username: String,
    pub profile_picture: String,
    pub is_online: bool,
    pub bio: Option<String>,
    pub current_position: Option<String>,
    pub created_at: Timestamp,
}
