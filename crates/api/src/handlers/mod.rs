pub mod chat;
pub mod connections;
pub mod posts;
pub mod status;
pub mod users;
