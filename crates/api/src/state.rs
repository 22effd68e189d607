use std::sync::Arc;

use crate::config::ServerConfig;

/// Handed to every handler through `State<AppState>`. Read-only after
/// startup; clones share the pool and config.
#[derive(Clone)]
pub struct AppState {
    pub pool: linkup_db::DbPool,
    pub config: Arc<ServerConfig>,
}
