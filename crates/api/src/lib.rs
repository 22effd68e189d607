//! HTTP layer of LinkUp.
//!
//! Built as a library so `tests/` can drive the real router through
//! `build_app_router` without binding a socket.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
