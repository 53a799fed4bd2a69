//! v001 -- initial schema: the single `kv` table backing a persisted origin.

use rusqlite::Connection;

const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY NOT NULL,  -- store key, e.g. "conversations"
    value TEXT NOT NULL               -- raw string payload (JSON documents)
);
"#;

/// Apply the v000 -> v001 upgrade.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
