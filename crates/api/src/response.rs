//! Shared response envelope for API handlers.
//!
//! Every successful response is `{ "message": ..., "data": ... }`. Use
//! [`ApiResponse::new`] rather than ad-hoc `json!` so the shape stays uniform.

use serde::Serialize;

/// Standard `{ "message": String, "data": T }` envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::new("Post created", post)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Self { message, data }
    }
}
