//! Online-status derivation.
//!
//! Clients send heartbeats that set `is_online` and bump `last_seen`. A client
//! that disappears without sending `is_online = false` would otherwise stay
//! online forever, so readers treat a stale heartbeat as offline.

use crate::types::Timestamp;

/// Heartbeats older than this many seconds are considered stale.
pub const PRESENCE_STALE_TIMEOUT_SECS: i64 = 120;

/// Whether a user should be shown as online at `now`.
pub fn is_effectively_online(
    is_online: bool,
    last_seen: Timestamp,
    now: Timestamp,
    timeout_secs: i64,
) -> bool {
    is_online && (now - last_seen).num_seconds() <= timeout_secs
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn fresh_heartbeat_is_online() {
        let now = Utc::now();
        let seen = now - Duration::seconds(30);
        assert!(is_effectively_online(true, seen, now, PRESENCE_STALE_TIMEOUT_SECS));
    }

    #[test]
    fn stale_heartbeat_is_offline() {
        let now = Utc::now();
        let seen = now - Duration::seconds(PRESENCE_STALE_TIMEOUT_SECS + 1);
        assert!(!is_effectively_online(true, seen, now, PRESENCE_STALE_TIMEOUT_SECS));
    }

    #[test]
    fn explicit_offline_wins() {
        let now = Utc::now();
        assert!(!is_effectively_online(false, now, now, PRESENCE_STALE_TIMEOUT_SECS));
    }
}
