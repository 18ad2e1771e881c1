//! Schema registry for the `notes` collection.
//!
//! # Responsibility
//! - Register collection schema versions in strictly increasing order.
//! - Upgrade a freshly opened store in one transaction.
//! - Confirm the collection shape before the gateway accepts traffic.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - A store written by a newer binary is refused, never downgraded.

use crate::store::{StoreError, StoreResult, NOTES_COLLECTION};
use log::info;
use rusqlite::Connection;

const NOTES_COLUMNS: &[&str] = &["id", "title", "tags", "file", "created_at"];

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_notes.sql"),
}];

/// Returns the newest collection schema version this binary can write.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings the store up to [`latest_version`] and verifies the collection.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let stored_version = stored_schema_version(conn)?;
    let latest = latest_version();

    if stored_version > latest {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version: stored_version,
            latest_supported: latest,
        });
    }

    if stored_version < latest {
        let tx = conn.transaction()?;
        for step in SCHEMA_STEPS
            .iter()
            .filter(|step| step.version > stored_version)
        {
            tx.execute_batch(step.sql)?;
            tx.execute_batch(&format!("PRAGMA user_version = {};", step.version))?;
        }
        tx.commit()?;
        info!(
            "event=store_migrate module=store status=ok from_version={} to_version={}",
            stored_version, latest
        );
    }

    ensure_collection_ready(conn)
}

fn stored_schema_version(conn: &Connection) -> StoreResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn ensure_collection_ready(conn: &Connection) -> StoreResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({NOTES_COLLECTION});"))?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(1)?);
    }

    if present.is_empty() {
        return Err(StoreError::MissingCollection(NOTES_COLLECTION));
    }

    for column in NOTES_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(StoreError::MissingField {
                collection: NOTES_COLLECTION,
                field: column,
            });
        }
    }

    Ok(())
}
