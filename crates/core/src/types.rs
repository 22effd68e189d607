//! Primitive aliases shared across crates.

/// Primary key type; every table uses `BIGSERIAL`.
pub type DbId = i64;

/// Stored as `TIMESTAMPTZ` and handled as UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
