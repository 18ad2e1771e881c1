//! Upload workflow: the ordered form steps from file pick to stored note.
//!
//! # Responsibility
//! - Model the form as an explicit state machine driven by user events.
//! - Keep notice timing as deferred actions instead of blocking sleeps.
//! - Project state into a toolkit-independent view for the shell.
//!
//! # Invariants
//! - All workflow logic runs on the caller's thread, one event at a time.
//! - No transition retries automatically; every failure waits for the user.

mod controller;
pub mod event;
pub mod notice;
pub mod state;
pub mod timer;
pub mod view;

pub use controller::{Dispatch, UploadWorkflow};
pub use event::{Event, EventKind};
pub use notice::{Notice, NoticeKind, NOTICE_DISPLAY};
pub use state::{Draft, Outcome, Step, WorkflowState};
pub use timer::TimerAction;
pub use view::{FormView, SubmissionSummary};
