//! Chat message types and room-key normalization.
//!
//! A chat room belongs to an unordered pair of users. Rooms are keyed by the
//! sorted pair `(low, high)` so that both participants resolve to the same
//! row regardless of who writes first.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum text message length, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// Body stored for image messages so inbox previews have something to show.
pub const IMAGE_PLACEHOLDER_BODY: &str = "[image]";

pub const MESSAGE_TYPE_TEXT: &str = "text";
pub const MESSAGE_TYPE_IMAGE: &str = "image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    Image,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Text => MESSAGE_TYPE_TEXT,
            MessageType::Image => MESSAGE_TYPE_IMAGE,
        }
    }
}

/// Sorted participant pair used as the room key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantPair {
    pub low: DbId,
    pub high: DbId,
}

impl ParticipantPair {
    /// Build the room key for two distinct users.
    pub fn new(a: DbId, b: DbId) -> Result<Self, CoreError> {
        if a == b {
            return Err(CoreError::Validation(
                "You cannot send a message to yourself".into(),
            ));
        }
        Ok(ParticipantPair {
            low: a.min(b),
            high: a.max(b),
        })
    }
}

/// Trim and validate a text message body.
pub fn validate_message_body(body: &str) -> Result<String, CoreError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(CoreError::Validation("Message must not be empty".into()));
    }
    if body.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message must be at most {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(body.to_string())
}

/// Image messages reference an already-stored file by name.
pub fn validate_media_reference(media_url: &str) -> Result<String, CoreError> {
    let media_url = media_url.trim();
    if media_url.is_empty() {
        return Err(CoreError::Validation("No image provided".into()));
    }
    Ok(media_url.to_string())
}
