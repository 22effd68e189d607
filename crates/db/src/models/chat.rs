//! Chat room and message models.

use linkup_core::chat::MessageType;
use linkup_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub room_id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub body: String,
    pub message_type: String,
    pub media_url: Option<String>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for sending a message. Fields are expected to be validated.
#[derive(Debug)]
pub struct CreateMessage {
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub body: String,
    pub message_type: MessageType,
    pub media_url: Option<String>,
}

/// Inbox row: a room joined with the other participant, the last message,
/// and the viewer's unread count.
#[derive(Debug, Clone, FromRow)]
pub struct RoomRow {
    pub id: DbId,
    pub updated_at: Timestamp,
    pub counterpart_id: DbId,
    pub counterpart_name: String,
    pub counterpart_username: String,
    pub counterpart_profile_picture: String,
    pub last_message_id: Option<DbId>,
    pub last_message_sender_id: Option<DbId>,
    pub last_message_body: Option<String>,
    pub last_message_type: Option<String>,
    pub last_message_created_at: Option<Timestamp>,
    pub unread_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LastMessage {
    pub id: DbId,
    pub sender_id: DbId,
    pub body: String,
    pub message_type: String,
    pub created_at: Timestamp,
}

/// A chat room as listed in the viewer's inbox.
#[derive(Debug, Clone, Serialize)]
pub struct RoomView {
    pub id: DbId,
    pub counterpart: UserSummary,
    pub last_message: Option<LastMessage>,
    pub unread_count: i64,
    pub updated_at: Timestamp,
}

impl From<RoomRow> for RoomView {
    fn from(row: RoomRow) -> Self {
        let last_message = match (
            row.last_message_id,
            row.last_message_sender_id,
            row.last_message_body,
            row.last_message_type,
            row.last_message_created_at,
        ) {
            (Some(id), Some(sender_id), Some(body), Some(message_type), Some(created_at)) => {
                Some(LastMessage {
                    id,
                    sender_id,
                    body,
                    message_type,
                    created_at,
                })
            }
            _ => None,
        };
        RoomView {
            id: row.id,
            counterpart: UserSummary {
                id: row.counterpart_id,
                name: row.counterpart_name,
                username: row.counterpart_username,
                profile_picture: row.counterpart_profile_picture,
            },
            last_message,
            unread_count: row.unread_count,
            updated_at: row.updated_at,
        }
    }
}
