//! Handlers for accounts, sessions, and profiles under `/users`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use linkup_core::error::CoreError;
use linkup_core::identity::{
    normalize_email, validate_name, validate_registration, validate_username,
};
use linkup_core::profile::{
    normalize_education, normalize_work, validate_bio, validate_position,
};
use linkup_core::types::DbId;
use linkup_db::models::profile::{DirectoryEntry, Profile, UpdateProfile, UserWithProfile};
use linkup_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use linkup_db::repositories::{ProfileRepo, UserRepo};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::generate_session_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Session handlers
// ---------------------------------------------------------------------------

/// POST /api/users/register
///
/// Create an account with an empty profile and sign the new user in.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let account =
        validate_registration(&input.name, &input.username, &input.email, &input.password)?;

    if UserRepo::exists_by_username_or_email(&state.pool, &account.username, &account.email)
        .await?
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with this username or email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)?;
    let user = UserRepo::create_with_profile(
        &state.pool,
        &CreateUser {
            name: account.name,
            username: account.username,
            email: account.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let response = start_session(&state, user.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("User registered successfully", response)),
    ))
}

/// POST /api/users/login
///
/// Unknown email and wrong password are indistinguishable to the caller.
/// Signing in replaces the previous session, so older tokens stop working.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "All fields are required".into(),
        )));
    }

    let email = normalize_email(&input.email).map_err(|_| invalid_credentials())?;
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&input.password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    let response = start_session(&state, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(ApiResponse::new("Login successful", response)))
}

/// POST /api/users/logout
///
/// Clear the caller's session and mark them offline.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<()>>> {
    UserRepo::end_session(&state.pool, auth.user_id, auth.session_id).await?;
    tracing::info!(user_id = auth.user_id, "User logged out");
    Ok(Json(ApiResponse::new("Logged out successfully", ())))
}

// ---------------------------------------------------------------------------
// Account and profile handlers
// ---------------------------------------------------------------------------

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<UserWithProfile>>> {
    let data = load_user_with_profile(&state, auth.user_id).await?;
    Ok(Json(ApiResponse::new("User fetched successfully", data)))
}

/// GET /api/users/profile/{user_id}
pub async fn get_profile(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<UserWithProfile>>> {
    let data = load_user_with_profile(&state, user_id).await?;
    Ok(Json(ApiResponse::new("Profile fetched successfully", data)))
}

/// GET /api/users/all
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<DirectoryEntry>>>> {
    let users = ProfileRepo::list_directory(&state.pool).await?;
    Ok(Json(ApiResponse::new("Users fetched successfully", users)))
}

/// POST /api/users/user_update
///
/// Partial update of name and username. A taken username surfaces as 409
/// through the `uq_users_username` constraint.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let update = UpdateUser {
        name: input.name.as_deref().map(validate_name).transpose()?,
        username: input.username.as_deref().map(validate_username).transpose()?,
    };

    let user = UserRepo::update(&state.pool, auth.user_id, &update)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", auth.user_id)))?;

    tracing::info!(user_id = user.id, "User updated");
    Ok(Json(ApiResponse::new(
        "User updated successfully",
        UserResponse::from(user),
    )))
}

/// POST /api/users/update_profile_data
///
/// Supplied work and education lists replace the stored ones after blank
/// entries are dropped.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<UpdateProfile>,
) -> AppResult<Json<ApiResponse<Profile>>> {
    if let Some(bio) = input.bio.as_deref() {
        validate_bio(bio)?;
    }
    if let Some(position) = input.current_position.as_deref() {
        validate_position(position)?;
    }
    let past_work = input.past_work.map(normalize_work).transpose()?;
    let education = input.education.map(normalize_education).transpose()?;

    let profile = ProfileRepo::update(
        &state.pool,
        auth.user_id,
        input.bio.as_deref().map(str::trim),
        input.current_position.as_deref().map(str::trim),
        past_work.as_deref(),
        education.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Profile", auth.user_id)))?;

    tracing::info!(user_id = auth.user_id, "Profile updated");
    Ok(Json(ApiResponse::new("Profile updated successfully", profile)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

/// Write a fresh session id for the user and sign a token bound to it.
async fn start_session(state: &AppState, user_id: DbId) -> AppResult<AuthResponse> {
    let session_id = Uuid::new_v4();
    UserRepo::start_session(&state.pool, user_id, session_id).await?;

    let token = generate_session_token(user_id, session_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let user: User = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", user_id)))?;

    Ok(AuthResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserResponse::from(user),
    })
}

async fn load_user_with_profile(state: &AppState, user_id: DbId) -> AppResult<UserWithProfile> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", user_id)))?;
    let profile = ProfileRepo::find_by_user_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Profile", user_id)))?;
    Ok(UserWithProfile {
        user: UserResponse::from(user),
        profile,
    })
}
