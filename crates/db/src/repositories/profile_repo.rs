//! Repository for the `profiles` table.

use linkup_core::profile::{EducationEntry, WorkEntry};
use linkup_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::profile::{DirectoryEntry, Profile};

const COLUMNS: &str =
    "id, user_id, bio, current_position, past_work, education, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a profile update. `None` arguments leave the column unchanged.
    ///
    /// Returns `None` if the user has no profile row.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        bio: Option<&str>,
        current_position: Option<&str>,
        past_work: Option<&[WorkEntry]>,
        education: Option<&[EducationEntry]>,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                bio = COALESCE($2, bio),
                current_position = COALESCE($3, current_position),
                past_work = COALESCE($4, past_work),
                education = COALESCE($5, education)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(bio)
            .bind(current_position)
            .bind(past_work.map(Json))
            .bind(education.map(Json))
            .fetch_optional(pool)
            .await
    }

    /// List every user with their profile headline, newest accounts first.
    pub async fn list_directory(pool: &PgPool) -> Result<Vec<DirectoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, DirectoryEntry>(
            "SELECT u.id, u.name, u.username, u.profile_picture, u.is_online,
                    p.bio, p.current_position, u.created_at
             FROM users u
             LEFT JOIN profiles p ON p.user_id = u.id
             ORDER BY u.created_at DESC, u.id DESC",
        )
        .fetch_all(pool)
        .await
    }
}
