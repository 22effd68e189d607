//! Bearer-token extractor. Adding `auth: AuthUser` to a handler's
//! arguments is what makes a route require login.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use linkup_core::error::CoreError;
use linkup_core::types::DbId;
use linkup_db::repositories::UserRepo;
use uuid::Uuid;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller, identified by `Authorization: Bearer <token>`.
///
/// The token must be correctly signed, unexpired, and carry the session id
/// currently stored on the user row. Logging out or logging in elsewhere
/// replaces that id, which invalidates every earlier token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub session_id: Uuid,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        if !UserRepo::has_session(&state.pool, claims.sub, claims.sid).await? {
            return Err(unauthorized("Session has ended. Please log in again"));
        }

        Ok(AuthUser {
            user_id: claims.sub,
            session_id: claims.sid,
        })
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}
