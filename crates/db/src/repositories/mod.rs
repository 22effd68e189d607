//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod chat_repo;
pub mod comment_repo;
pub mod connection_repo;
pub mod post_repo;
pub mod profile_repo;
pub mod user_repo;

pub use chat_repo::ChatRepo;
pub use comment_repo::CommentRepo;
pub use connection_repo::ConnectionRepo;
pub use post_repo::PostRepo;
pub use profile_repo::ProfileRepo;
pub use user_repo::UserRepo;
