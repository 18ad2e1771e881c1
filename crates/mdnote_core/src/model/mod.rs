//! Domain model for markdown note uploads.
//!
//! # Responsibility
//! - Define the note record shared by the workflow and the store gateway.
//!
//! # Invariants
//! - A note is only complete once its content has been read from disk.

pub mod note;
