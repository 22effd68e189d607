//! Post, comment, and media rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum post body length, in characters.
pub const MAX_POST_LENGTH: usize = 3000;

/// Maximum comment length, in characters.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Maximum length of a stored media file name.
pub const MAX_MEDIA_NAME_LENGTH: usize = 255;

/// Coarse classification of a post attachment, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Document,
    Other,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Document => "document",
            MediaKind::Other => "other",
        }
    }

    /// Classify by file extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Self {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "svg" => MediaKind::Image,
            "mp4" | "mov" | "webm" | "mkv" | "avi" => MediaKind::Video,
            "pdf" | "doc" | "docx" | "ppt" | "pptx" | "txt" => MediaKind::Document,
            _ => MediaKind::Other,
        }
    }
}

/// Trim and validate a post body.
pub fn validate_post_body(body: &str) -> Result<String, CoreError> {
    validate_text(body, "Post body", MAX_POST_LENGTH)
}

/// Trim and validate a comment body.
pub fn validate_comment_body(body: &str) -> Result<String, CoreError> {
    validate_text(body, "Comment", MAX_COMMENT_LENGTH)
}

/// Validate an optional media file name, returning it with its coarse kind.
///
/// Blank names are treated as "no attachment". Path separators are rejected
/// because media is always referenced by bare file name.
pub fn validate_media(media: Option<&str>) -> Result<Option<(String, MediaKind)>, CoreError> {
    let Some(name) = media.map(str::trim).filter(|m| !m.is_empty()) else {
        return Ok(None);
    };
    if name.len() > MAX_MEDIA_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Media file name must be at most {MAX_MEDIA_NAME_LENGTH} bytes"
        )));
    }
    if name.contains('/') || name.contains('\\') || name == ".." {
        return Err(CoreError::Validation(
            "Media must be a bare file name".into(),
        ));
    }
    Ok(Some((name.to_string(), MediaKind::from_file_name(name))))
}

/// A comment may be deleted by its own author or by the author of the post
/// it was left on.
pub fn can_delete_comment(actor_id: DbId, comment_author_id: DbId, post_author_id: DbId) -> bool {
    actor_id == comment_author_id || actor_id == post_author_id
}

/// Only the author may delete a post.
pub fn ensure_post_author(actor_id: DbId, post_author_id: DbId) -> Result<(), CoreError> {
    if actor_id != post_author_id {
        return Err(CoreError::Unauthorized(
            "Only the author can delete this post".into(),
        ));
    }
    Ok(())
}

fn validate_text(text: &str, field: &str, max: usize) -> Result<String, CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if text.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_bodies_rejected() {
        assert_matches!(validate_post_body("   "), Err(CoreError::Validation(_)));
        assert_matches!(validate_comment_body(""), Err(CoreError::Validation(_)));
        assert_eq!(validate_post_body("  hello ").unwrap(), "hello");
    }

    #[test]
    fn over_long_comment_rejected() {
        let long = "c".repeat(MAX_COMMENT_LENGTH + 1);
        assert_matches!(validate_comment_body(&long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn media_kind_from_extension() {
        assert_eq!(MediaKind::from_file_name("cat.JPG"), MediaKind::Image);
        assert_eq!(MediaKind::from_file_name("talk.mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_file_name("resume.pdf"), MediaKind::Document);
        assert_eq!(MediaKind::from_file_name("archive"), MediaKind::Other);
    }

    #[test]
    fn media_validation() {
        assert_eq!(validate_media(None).unwrap(), None);
        assert_eq!(validate_media(Some("  ")).unwrap(), None);
        assert_eq!(
            validate_media(Some("1700000000-cat.png")).unwrap(),
            Some(("1700000000-cat.png".to_string(), MediaKind::Image))
        );
        assert_matches!(
            validate_media(Some("../etc/passwd")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn comment_deletion_is_dual_authorized() {
        let comment_author = 1;
        let post_author = 2;
        let outsider = 3;
        assert!(can_delete_comment(comment_author, comment_author, post_author));
        assert!(can_delete_comment(post_author, comment_author, post_author));
        assert!(!can_delete_comment(outsider, comment_author, post_author));
    }

    #[test]
    fn only_author_deletes_post() {
        assert!(ensure_post_author(5, 5).is_ok());
        assert_matches!(ensure_post_author(6, 5), Err(CoreError::Unauthorized(_)));
    }
}
