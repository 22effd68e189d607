//! Handlers for online status under `/user-status`.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use linkup_core::error::CoreError;
use linkup_core::presence::is_effectively_online;
use linkup_core::types::{DbId, Timestamp};
use linkup_db::models::user::UserStatusRow;
use linkup_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /user-status/update_status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub is_online: bool,
}

/// Presence as reported to clients.
///
/// `is_online` is the effective value: a heartbeat older than the presence
/// timeout reads as offline even if the stored flag is still set.
#[derive(Debug, Serialize)]
pub struct UserStatus {
    pub user_id: DbId,
    pub name: String,
    pub username: String,
    pub profile_picture: String,
    pub is_online: bool,
    pub last_seen: Timestamp,
}

impl UserStatus {
    fn from_row(row: UserStatusRow, timeout_secs: i64) -> Self {
        UserStatus {
            user_id: row.id,
            is_online: is_effectively_online(row.is_online, row.last_seen, Utc::now(), timeout_secs),
            name: row.name,
            username: row.username,
            profile_picture: row.profile_picture,
            last_seen: row.last_seen,
        }
    }
}

/// POST /api/user-status/update_status
///
/// Heartbeat from the client.
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<UpdateStatusBody>,
) -> AppResult<Json<ApiResponse<UserStatus>>> {
    let row = UserRepo::update_status(&state.pool, auth.user_id, input.is_online)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", auth.user_id)))?;

    tracing::debug!(user_id = auth.user_id, is_online = input.is_online, "Status updated");
    Ok(Json(ApiResponse::new(
        "Status updated",
        UserStatus::from_row(row, state.config.presence_timeout_secs),
    )))
}

/// GET /api/user-status/status/{user_id}
pub async fn get_status(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<UserStatus>>> {
    let row = UserRepo::find_status(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", user_id)))?;

    Ok(Json(ApiResponse::new(
        "Status fetched",
        UserStatus::from_row(row, state.config.presence_timeout_secs),
    )))
}
