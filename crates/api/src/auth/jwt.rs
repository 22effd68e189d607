//! Session tokens.
//!
//! A token is an HS256 JWT naming the user and the session it was issued
//! for. The session id must still match `users.session_id` when the token is
//! presented; a later login or a logout replaces it, so older tokens stop
//! working without any blacklist.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use linkup_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seven days.
const DEFAULT_TOKEN_LIFETIME_MINS: i64 = 10_080;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// Session the token belongs to.
    pub sid: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    fn issue(user_id: DbId, session_id: Uuid, lifetime_secs: i64) -> Self {
        let iat = Utc::now().timestamp();
        Claims {
            sub: user_id,
            sid: session_id,
            exp: iat + lifetime_secs,
            iat,
        }
    }
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// `JWT_SECRET` is required and must be non-empty.
    /// `JWT_ACCESS_EXPIRY_MINS` defaults to seven days.
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => panic!("JWT_SECRET must be set to a non-empty value"),
        };

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .unwrap_or_else(|_| panic!("JWT_ACCESS_EXPIRY_MINS is not a number: {raw}")),
            Err(_) => DEFAULT_TOKEN_LIFETIME_MINS,
        };

        JwtConfig {
            secret,
            access_token_expiry_mins,
        }
    }

    /// Lifetime reported to clients as `expires_in`.
    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}

/// Sign a token for `user_id` in session `session_id`.
pub fn generate_session_token(
    user_id: DbId,
    session_id: Uuid,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::issue(user_id, session_id, config.expires_in_secs());
    jsonwebtoken::encode(&Header::default(), &claims, &config.encoding_key())
}

/// Check signature and expiry only. Whether the session is still current is
/// decided by the `AuthUser` extractor.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    jsonwebtoken::decode::<Claims>(token, &config.decoding_key(), &Validation::default())
        .map(|data| data.claims)
}
