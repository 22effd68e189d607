//! Domain types, constants, and validators for the LinkUp backend.
//!
//! This crate performs no IO. The database and API crates both depend on it
//! so that status names, validation rules, and authorization checks live in
//! one place.

pub mod chat;
pub mod connection;
pub mod error;
pub mod identity;
pub mod post;
pub mod presence;
pub mod profile;
pub mod types;
