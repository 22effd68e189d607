//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` create/update DTOs where the API accepts input
//! - Read models that join in the data a listing needs

pub mod chat;
pub mod comment;
pub mod connection;
pub mod post;
pub mod profile;
pub mod user;
