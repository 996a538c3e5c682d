//! Vendor camera table.

pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS cameras (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    direction TEXT,
    status TEXT NOT NULL DEFAULT 'NORMAL',
    image_url TEXT,
    stream_url TEXT,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cameras_lat ON cameras(latitude);
CREATE INDEX IF NOT EXISTS idx_cameras_lng ON cameras(longitude);
"#;
