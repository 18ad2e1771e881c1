//! Core logic for the markdown note uploader.
//! The workflow, store gateway and configuration live here; shells only
//! render views and forward user events.

pub mod config;
pub mod logging;
pub mod model;
pub mod store;
pub mod workflow;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::note::{normalize_tag, Note, NoteValidationError};
pub use store::{NoteGateway, SqliteNoteGateway, StoreError, StoreResult, StoreUri};
pub use workflow::{Dispatch, Event, FormView, Notice, NoticeKind, Step, UploadWorkflow};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
