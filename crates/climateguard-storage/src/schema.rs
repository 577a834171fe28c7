//! Table definitions.

/// v1: one row per bucket, value stored as JSON text.
pub const OFFSET_BUCKETS_V1: &str = "
    CREATE TABLE IF NOT EXISTS offset_buckets (
        bucket      TEXT PRIMARY KEY NOT NULL,
        value_json  TEXT NOT NULL,
        updated_at  INTEGER NOT NULL
    );
";
