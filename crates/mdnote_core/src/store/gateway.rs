//! SQLite-backed note gateway.
//!
//! # Responsibility
//! - Open file or in-memory stores and bring their schema up to date.
//! - Run a bounded health check before the gateway is handed out.
//! - Implement duplicate-title count and note insert.
//!
//! # Invariants
//! - A returned gateway has migrations applied and passed its health check.
//! - Tags are stored as a JSON array so order and repeats survive.
//! - Title comparison uses SQLite `BINARY` collation (case-sensitive).

use super::migrations::apply_migrations;
use super::{
    NoteGateway, StoreError, StoreResult, StoreTarget, StoreUri, CONNECT_TIMEOUT, QUERY_TIMEOUT,
};
use crate::model::note::Note;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// One persisted note as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNote {
    pub id: Uuid,
    pub note: Note,
    /// Insert timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Gateway over the process-wide store connection.
pub struct SqliteNoteGateway {
    conn: Connection,
    mode: &'static str,
}

impl SqliteNoteGateway {
    /// Opens the store named by `uri`, applies migrations and health-checks it.
    ///
    /// # Side effects
    /// - Creates the store file when it does not exist yet.
    /// - Emits `store_connect` logging events with duration and status.
    pub fn connect(uri: &StoreUri) -> StoreResult<Self> {
        let started_at = Instant::now();
        let mode = uri.mode();
        info!("event=store_connect module=store status=start mode={mode}");

        let opened = match &uri.target {
            StoreTarget::Memory => Connection::open_in_memory(),
            StoreTarget::File(path) => Connection::open(path),
        };
        let mut conn = match opened {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=store_connect module=store status=error mode={mode} duration_ms={} error_code=store_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        if let Err(err) = bootstrap_connection(&mut conn) {
            error!(
                "event=store_connect module=store status=error mode={mode} duration_ms={} error_code=store_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }

        info!(
            "event=store_connect module=store status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        info!("Connected to database");
        Ok(Self { conn, mode })
    }

    /// Closes the connection within [`CONNECT_TIMEOUT`].
    ///
    /// Callers treat an error here as fatal.
    pub fn disconnect(self) -> StoreResult<()> {
        info!("Closing database connection");
        let mode = self.mode;
        self.conn.busy_timeout(CONNECT_TIMEOUT)?;
        match self.conn.close() {
            Ok(()) => {
                info!("event=store_disconnect module=store status=ok mode={mode}");
                Ok(())
            }
            Err((_conn, err)) => {
                error!(
                    "event=store_disconnect module=store status=error mode={mode} error={err}"
                );
                Err(err.into())
            }
        }
    }

    /// Loads every note stored under `title`, oldest first.
    pub fn find_by_title(&self, title: &str) -> StoreResult<Vec<StoredNote>> {
        self.bounded(QUERY_TIMEOUT)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, title, tags, file, created_at
             FROM notes
             WHERE title = ?1
             ORDER BY created_at ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([title])?;
        let mut found = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let id = Uuid::parse_str(&id_text).map_err(|_| {
                StoreError::InvalidData(format!("invalid id `{id_text}` in notes.id"))
            })?;
            let tags_json: String = row.get("tags")?;
            found.push(StoredNote {
                id,
                note: Note {
                    title: row.get("title")?,
                    tags: serde_json::from_str(&tags_json)?,
                    content: row.get("file")?,
                },
                created_at: row.get("created_at")?,
            });
        }
        Ok(found)
    }

    fn try_insert(&self, note: &Note) -> StoreResult<Uuid> {
        note.validate()?;
        self.bounded(QUERY_TIMEOUT)?;

        let id = Uuid::new_v4();
        let tags_json = serde_json::to_string(&note.tags)?;
        self.conn.execute(
            "INSERT INTO notes (id, title, tags, file) VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                note.title.as_str(),
                tags_json,
                note.content.as_slice()
            ],
        )?;
        Ok(id)
    }

    fn bounded(&self, timeout: Duration) -> StoreResult<()> {
        self.conn.busy_timeout(timeout)?;
        Ok(())
    }
}

impl NoteGateway for SqliteNoteGateway {
    fn count_by_title(&self, title: &str) -> StoreResult<u64> {
        info!("event=note_duplicate_check module=store status=start");
        self.bounded(QUERY_TIMEOUT)?;
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE title = ?1;",
            [title],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn insert_note(&self, note: &Note) -> bool {
        let started_at = Instant::now();
        match self.try_insert(note) {
            Ok(id) => {
                info!(
                    "event=note_insert module=store status=ok duration_ms={} tags={} bytes={}",
                    started_at.elapsed().as_millis(),
                    note.tags.len(),
                    note.content.len()
                );
                info!("Inserted document with id: {id}");
                true
            }
            Err(err) => {
                error!(
                    "event=note_insert module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                false
            }
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(CONNECT_TIMEOUT)?;
    apply_migrations(conn)?;
    health_check(conn)?;
    conn.busy_timeout(QUERY_TIMEOUT)?;
    Ok(())
}

fn health_check(conn: &Connection) -> StoreResult<()> {
    let ping: i64 = conn.query_row("SELECT 1;", [], |row| row.get(0))?;
    if ping != 1 {
        return Err(StoreError::HealthCheck(format!(
            "unexpected ping result {ping}"
        )));
    }

    let integrity: Option<String> = conn
        .query_row("PRAGMA quick_check;", [], |row| row.get(0))
        .optional()?;
    match integrity.as_deref() {
        Some("ok") => Ok(()),
        Some(other) => Err(StoreError::HealthCheck(format!(
            "integrity check reported `{other}`"
        ))),
        None => Err(StoreError::HealthCheck(
            "integrity check returned no rows".to_string(),
        )),
    }
}
