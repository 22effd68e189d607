//! Repository for the `chat_rooms` and `messages` tables.

use linkup_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat::{CreateMessage, Message, RoomRow, RoomView};

const MESSAGE_COLUMNS: &str = "id, room_id, sender_id, receiver_id, body, message_type, \
                               media_url, is_read, read_at, created_at";

pub struct ChatRepo;

impl ChatRepo {
    /// Store a message and link it as the room's latest.
    ///
    /// The room is upserted by its sorted participant pair, so concurrent
    /// first messages from both sides land in the same room. Room upsert,
    /// message insert, and pointer update commit together.
    pub async fn send_message(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let low = input.sender_id.min(input.receiver_id);
        let high = input.sender_id.max(input.receiver_id);

        let mut tx = pool.begin().await?;

        let room_id: DbId = sqlx::query_scalar(
            "INSERT INTO chat_rooms (participant_low, participant_high)
             VALUES ($1, $2)
             ON CONFLICT (participant_low, participant_high) DO UPDATE SET updated_at = NOW()
             RETURNING id",
        )
        .bind(low)
        .bind(high)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO messages (room_id, sender_id, receiver_id, body, message_type, media_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {MESSAGE_COLUMNS}"
        );
        let message = sqlx::query_as::<_, Message>(&query)
            .bind(room_id)
            .bind(input.sender_id)
            .bind(input.receiver_id)
            .bind(&input.body)
            .bind(input.message_type.as_str())
            .bind(&input.media_url)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE chat_rooms SET last_message_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(room_id)
            .bind(message.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(message)
    }

    /// Every message exchanged between two users, oldest first.
    pub async fn history(pool: &PgPool, a: DbId, b: DbId) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages
             WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(a)
            .bind(b)
            .fetch_all(pool)
            .await
    }

    /// The user's inbox: rooms ordered by latest activity.
    pub async fn list_rooms(pool: &PgPool, user_id: DbId) -> Result<Vec<RoomView>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RoomRow>(
            "SELECT r.id, r.updated_at,
                    u.id AS counterpart_id, u.name AS counterpart_name,
                    u.username AS counterpart_username,
                    u.profile_picture AS counterpart_profile_picture,
                    m.id AS last_message_id, m.sender_id AS last_message_sender_id,
                    m.body AS last_message_body, m.message_type AS last_message_type,
                    m.created_at AS last_message_created_at,
                    (SELECT COUNT(*) FROM messages um
                     WHERE um.room_id = r.id AND um.receiver_id = $1 AND NOT um.is_read)
                        AS unread_count
             FROM chat_rooms r
             JOIN users u ON u.id = CASE WHEN r.participant_low = $1
                                         THEN r.participant_high ELSE r.participant_low END
             LEFT JOIN messages m ON m.id = r.last_message_id
             WHERE r.participant_low = $1 OR r.participant_high = $1
             ORDER BY r.updated_at DESC, r.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(RoomView::from).collect())
    }

    /// Mark every unread message from `sender_id` to `reader_id` as read.
    ///
    /// Returns the number of messages flipped; zero on repeat calls.
    pub async fn mark_read(
        pool: &PgPool,
        reader_id: DbId,
        sender_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = true, read_at = NOW()
             WHERE receiver_id = $1 AND sender_id = $2 AND NOT is_read",
        )
        .bind(reader_id)
        .bind(sender_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Total unread messages addressed to `user_id`.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND NOT is_read")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
