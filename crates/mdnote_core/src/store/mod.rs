//! Document store gateway for uploaded notes.
//!
//! # Responsibility
//! - Open, health-check and close the process-wide store connection.
//! - Expose the two queries the upload workflow needs: duplicate-title count
//!   and single-note insert.
//! - Keep SQL details inside the store boundary.
//!
//! # Invariants
//! - Every gateway call is bounded by a fixed timeout.
//! - Insert failures are logged here and reported upward only as `false`.
//! - The gateway never retains a note after an insert returns.

use crate::model::note::{Note, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

mod gateway;
pub mod migrations;
mod uri;

pub use gateway::{SqliteNoteGateway, StoredNote};
pub use uri::{StoreTarget, StoreUri};

/// Name of the single collection holding uploaded notes.
pub const NOTES_COLLECTION: &str = "notes";
/// Bound applied to count and insert calls.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);
/// Bound applied to connect (including health check) and disconnect.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure for connection, schema and query operations.
#[derive(Debug)]
pub enum StoreError {
    InvalidUri(String),
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    MissingCollection(&'static str),
    MissingField {
        collection: &'static str,
        field: &'static str,
    },
    HealthCheck(String),
    InvalidData(String),
    Encoding(serde_json::Error),
    Validation(NoteValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUri(message) => write!(f, "invalid store uri: {message}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::MissingCollection(collection) => {
                write!(f, "store is missing the `{collection}` collection")
            }
            Self::MissingField { collection, field } => {
                write!(f, "collection `{collection}` is missing field `{field}`")
            }
            Self::HealthCheck(message) => write!(f, "store health check failed: {message}"),
            Self::InvalidData(message) => write!(f, "invalid stored note data: {message}"),
            Self::Encoding(err) => write!(f, "invalid tag encoding: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Store operations the upload workflow depends on.
pub trait NoteGateway {
    /// Counts stored notes whose title equals `title` exactly.
    fn count_by_title(&self, title: &str) -> StoreResult<u64>;
    /// Inserts one note. Returns whether the insert succeeded.
    fn insert_note(&self, note: &Note) -> bool;
}

impl<G: NoteGateway + ?Sized> NoteGateway for &G {
    fn count_by_title(&self, title: &str) -> StoreResult<u64> {
        (**self).count_by_title(title)
    }

    fn insert_note(&self, note: &Note) -> bool {
        (**self).insert_note(note)
    }
}
