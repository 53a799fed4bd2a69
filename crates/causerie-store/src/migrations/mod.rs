//! Schema migrations for disk-backed origins.
//!
//! Each migration runs at most once, guarded by the SQLite `user_version`
//! pragma. Memory-backed origins never touch this module.

pub mod v001_initial;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Schema version the crate expects. Bump together with a new migration
/// module when the layout changes.
const CURRENT_VERSION: u32 = 1;

/// Bring the open database up to [`CURRENT_VERSION`].
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let applied: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    debug!(applied, expected = CURRENT_VERSION, "checking store schema");

    if applied < 1 {
        info!("applying store migration v001 (kv table)");
        v001_initial::up(conn).map_err(|e| StoreError::Migration(e.to_string()))?;
        conn.pragma_update(None, "user_version", 1)?;
    }

    Ok(())
}
