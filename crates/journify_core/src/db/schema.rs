//! Document-store schema bootstrap.
//!
//! # Invariants
//! - `PRAGMA user_version` records the schema version of the file.
//! - A database stamped by a newer build is refused, never reinterpreted.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const DOCUMENTS_TABLE_SQL: &str = include_str!("documents.sql");

/// Creates the `documents` table on a fresh database and stamps its version.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    match version {
        SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(DOCUMENTS_TABLE_SQL)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            info!("event=db_schema module=db status=ok created=true version={SCHEMA_VERSION}");
            Ok(())
        }
        newer => Err(DbError::UnsupportedSchemaVersion {
            db_version: newer,
            latest_supported: SCHEMA_VERSION,
        }),
    }
}
