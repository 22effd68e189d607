//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed session tokens bound to a revocable session id.

pub mod jwt;
pub mod password;
