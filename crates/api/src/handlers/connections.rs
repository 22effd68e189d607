//! Handlers for the connection graph under `/users`.
//!
//! Listings are returned from the caller's side: every entry names the
//! `counterpart` and whether the edge is `incoming` or `outgoing`.

use axum::extract::State;
use axum::Json;
use linkup_core::connection::{authorize_response, ensure_not_self, ConnectionStatus, Decision};
use linkup_core::error::CoreError;
use linkup_core::types::DbId;
use linkup_db::models::connection::{ConnectionRequest, ConnectionView};
use linkup_db::repositories::{ConnectionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const DUPLICATE_REQUEST: &str = "A connection or pending request already exists between these users";

/// Request body for `POST /users/send_connection_request`.
#[derive(Debug, Deserialize)]
pub struct SendRequestBody {
    pub target_id: DbId,
}

/// Request body for `POST /users/respond_connection_request`.
#[derive(Debug, Deserialize)]
pub struct RespondBody {
    pub request_id: DbId,
    pub action: Decision,
}

/// Request body for `DELETE /users/remove_connection`.
#[derive(Debug, Deserialize)]
pub struct RemoveConnectionBody {
    /// The other endpoint of the connection.
    pub user_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct RemovedConnection {
    pub user_id: DbId,
    pub removed: u64,
}

/// POST /api/users/send_connection_request
pub async fn send_request(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<SendRequestBody>,
) -> AppResult<Json<ApiResponse<ConnectionRequest>>> {
    ensure_not_self(auth.user_id, input.target_id)?;

    if UserRepo::find_by_id(&state.pool, input.target_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found("User", input.target_id)));
    }

    if ConnectionRepo::find_live_between(&state.pool, auth.user_id, input.target_id)
        .await?
        .is_some()
    {
        return Err(duplicate_request());
    }

    // A concurrent request for the same pair loses on the partial unique
    // index and comes back as `None`.
    let request = ConnectionRepo::create(&state.pool, auth.user_id, input.target_id)
        .await?
        .ok_or_else(duplicate_request)?;

    tracing::info!(
        request_id = request.id,
        requester_id = auth.user_id,
        target_id = input.target_id,
        "Connection request sent"
    );
    Ok(Json(ApiResponse::new("Connection request sent", request)))
}

/// POST /api/users/respond_connection_request
///
/// Only the target may answer, and only while the request is pending.
pub async fn respond_request(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<RespondBody>,
) -> AppResult<Json<ApiResponse<ConnectionRequest>>> {
    let request = ConnectionRepo::find_by_id(&state.pool, input.request_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ConnectionRequest", input.request_id)))?;

    let current = ConnectionStatus::parse(&request.status)?;
    let next = authorize_response(auth.user_id, request.target_id, current, input.action)?;

    let updated = ConnectionRepo::respond(&state.pool, request.id, next)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Connection request was already answered".into(),
            ))
        })?;

    tracing::info!(
        request_id = updated.id,
        status = %updated.status,
        "Connection request answered"
    );
    Ok(Json(ApiResponse::new("Connection request updated", updated)))
}

/// GET /api/users/my_connection_requests
///
/// Pending requests addressed to the caller.
pub async fn list_incoming(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<ConnectionView>>>> {
    let requests = ConnectionRepo::list_incoming(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::new("Connection requests fetched", requests)))
}

/// GET /api/users/sent_connection_requests
pub async fn list_outgoing(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<ConnectionView>>>> {
    let requests = ConnectionRepo::list_outgoing(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::new("Sent connection requests fetched", requests)))
}

/// GET /api/users/my_connections
pub async fn list_connections(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<ConnectionView>>>> {
    let connections = ConnectionRepo::list_accepted(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::new("Connections fetched", connections)))
}

/// DELETE /api/users/remove_connection
pub async fn remove_connection(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<RemoveConnectionBody>,
) -> AppResult<Json<ApiResponse<RemovedConnection>>> {
    let removed = ConnectionRepo::remove(&state.pool, auth.user_id, input.user_id).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::not_found("Connection", input.user_id)));
    }

    tracing::info!(user_id = auth.user_id, other_id = input.user_id, "Connection removed");
    Ok(Json(ApiResponse::new(
        "Connection removed",
        RemovedConnection {
            user_id: input.user_id,
            removed,
        },
    )))
}

fn duplicate_request() -> AppError {
    AppError::Core(CoreError::Conflict(DUPLICATE_REQUEST.into()))
}
