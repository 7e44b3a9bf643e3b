//! Schema bootstrap for the parcel table.
//!
//! # Responsibility
//! - Create the `parcel` table on first open.
//! - Refuse databases written by a newer schema.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Bootstrap is idempotent and runs in a single transaction.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Returns the schema version mirrored in `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Creates the schema on a fresh database; no-op on an up-to-date one.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = schema_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            found: current_version,
            supported: SCHEMA_VERSION,
        });
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}
