//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- the caller identified by a valid session token.

pub mod auth;
