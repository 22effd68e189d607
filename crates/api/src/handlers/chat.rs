//! Handlers for one-to-one messaging under `/chat`.
//!
//! Sending requires an accepted connection between the two users. The check
//! runs against the connection graph on every send, so removing a connection
//! stops further messages immediately.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use linkup_core::chat::{
    validate_media_reference, validate_message_body, MessageType, ParticipantPair,
    IMAGE_PLACEHOLDER_BODY,
};
use linkup_core::error::CoreError;
use linkup_core::types::DbId;
use linkup_db::models::chat::{CreateMessage, Message, RoomView};
use linkup_db::repositories::{ChatRepo, ConnectionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /chat/send_message`.
#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    pub receiver_id: DbId,
    #[serde(default)]
    pub message: String,
}

/// Request body for `POST /chat/send_image`.
#[derive(Debug, Deserialize)]
pub struct SendImageBody {
    pub receiver_id: DbId,
    #[serde(default)]
    pub media_url: String,
}

/// Query parameters for `GET /chat/chat_history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub other_user_id: DbId,
}

/// Request body for `POST /chat/mark_as_read`.
#[derive(Debug, Deserialize)]
pub struct MarkReadBody {
    pub sender_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResult {
    pub updated: u64,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread_count: i64,
}

/// POST /api/chat/send_message
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<SendMessageBody>,
) -> AppResult<(StatusCode, Json<ApiResponse<Message>>)> {
    ParticipantPair::new(auth.user_id, input.receiver_id)?;
    let body = validate_message_body(&input.message)?;

    let message = deliver(
        &state,
        CreateMessage {
            sender_id: auth.user_id,
            receiver_id: input.receiver_id,
            body,
            message_type: MessageType::Text,
            media_url: None,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Message sent successfully", message)),
    ))
}

/// POST /api/chat/send_image
///
/// The image is referenced by name; the stored body is a placeholder.
pub async fn send_image(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<SendImageBody>,
) -> AppResult<(StatusCode, Json<ApiResponse<Message>>)> {
    ParticipantPair::new(auth.user_id, input.receiver_id)?;
    let media_url = validate_media_reference(&input.media_url)?;

    let message = deliver(
        &state,
        CreateMessage {
            sender_id: auth.user_id,
            receiver_id: input.receiver_id,
            body: IMAGE_PLACEHOLDER_BODY.to_string(),
            message_type: MessageType::Image,
            media_url: Some(media_url),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Image sent successfully", message)),
    ))
}

/// GET /api/chat/chat_history?other_user_id=
///
/// Every message between the caller and the other user, oldest first.
pub async fn chat_history(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(query): AppQuery<HistoryQuery>,
) -> AppResult<Json<ApiResponse<Vec<Message>>>> {
    let messages = ChatRepo::history(&state.pool, auth.user_id, query.other_user_id).await?;
    Ok(Json(ApiResponse::new("Chat history fetched", messages)))
}

/// GET /api/chat/chat_rooms
pub async fn chat_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<RoomView>>>> {
    let rooms = ChatRepo::list_rooms(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::new("Chat rooms fetched", rooms)))
}

/// POST /api/chat/mark_as_read
///
/// Idempotent; a repeat call reports zero updates.
pub async fn mark_as_read(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<MarkReadBody>,
) -> AppResult<Json<ApiResponse<MarkReadResult>>> {
    let updated = ChatRepo::mark_read(&state.pool, auth.user_id, input.sender_id).await?;
    tracing::debug!(
        reader_id = auth.user_id,
        sender_id = input.sender_id,
        updated,
        "Messages marked as read"
    );
    Ok(Json(ApiResponse::new(
        "Messages marked as read",
        MarkReadResult { updated },
    )))
}

/// GET /api/chat/unread_count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<UnreadCount>>> {
    let unread_count = ChatRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::new(
        "Unread count fetched",
        UnreadCount { unread_count },
    )))
}

/// Check the receiver and the connection, then store the message.
async fn deliver(state: &AppState, input: CreateMessage) -> AppResult<Message> {
    if UserRepo::find_by_id(&state.pool, input.receiver_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found("User", input.receiver_id)));
    }

    if !ConnectionRepo::are_connected(&state.pool, input.sender_id, input.receiver_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only message your connections".into(),
        )));
    }

    let message = ChatRepo::send_message(&state.pool, &input).await?;
    tracing::info!(
        message_id = message.id,
        room_id = message.room_id,
        sender_id = message.sender_id,
        receiver_id = message.receiver_id,
        message_type = %message.message_type,
        "Message sent"
    );
    Ok(message)
}
