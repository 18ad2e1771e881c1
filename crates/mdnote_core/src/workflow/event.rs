//! User events and the `(step, event)` acceptance table.

use super::state::{Outcome, Step};
use std::path::PathBuf;

/// One user action delivered by the presentation shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    FilePicked(PathBuf),
    TitleSubmitted(String),
    TagSubmitted(String),
    TagRemoved(String),
    SubmitRequested,
    ConfirmationDismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    FilePicked,
    TitleSubmitted,
    TagSubmitted,
    TagRemoved,
    SubmitRequested,
    ConfirmationDismissed,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::FilePicked(_) => EventKind::FilePicked,
            Self::TitleSubmitted(_) => EventKind::TitleSubmitted,
            Self::TagSubmitted(_) => EventKind::TagSubmitted,
            Self::TagRemoved(_) => EventKind::TagRemoved,
            Self::SubmitRequested => EventKind::SubmitRequested,
            Self::ConfirmationDismissed => EventKind::ConfirmationDismissed,
        }
    }
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FilePicked => "file_picked",
            Self::TitleSubmitted => "title_submitted",
            Self::TagSubmitted => "tag_submitted",
            Self::TagRemoved => "tag_removed",
            Self::SubmitRequested => "submit_requested",
            Self::ConfirmationDismissed => "confirmation_dismissed",
        }
    }
}

// A failed upload leaves a complete draft on `Idle`; the controller checks it
// against that draft's furthest step, which makes `submit` the retry path.
const ACCEPTED: &[(Step, EventKind)] = &[
    (Step::Idle, EventKind::FilePicked),
    (Step::FileSelected, EventKind::FilePicked),
    (Step::FileSelected, EventKind::TitleSubmitted),
    (Step::TitleEntered, EventKind::FilePicked),
    (Step::TitleEntered, EventKind::TitleSubmitted),
    (Step::TitleEntered, EventKind::TagSubmitted),
    (Step::TagsEntered, EventKind::FilePicked),
    (Step::TagsEntered, EventKind::TitleSubmitted),
    (Step::TagsEntered, EventKind::TagSubmitted),
    (Step::TagsEntered, EventKind::TagRemoved),
    (Step::TagsEntered, EventKind::SubmitRequested),
    (Step::ConfirmPending, EventKind::ConfirmationDismissed),
];

/// Whether `kind` may be handled while on `step`.
pub fn is_accepted(step: Step, kind: EventKind) -> bool {
    match step {
        Step::Submitting | Step::Done(Outcome::Success) | Step::Done(Outcome::Failure) => false,
        _ => ACCEPTED.contains(&(step, kind)),
    }
}
