//! Workflow state owned by the upload controller.
//!
//! # Invariants
//! - `Draft::tags` holds normalized tags in insertion order, repeats allowed.
//! - `pending` is only set from `ConfirmPending` through `Done`.

use super::notice::Notices;
use super::timer::Timers;
use crate::model::note::Note;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Step the user is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Idle,
    FileSelected,
    TitleEntered,
    TagsEntered,
    ConfirmPending,
    Submitting,
    Done(Outcome),
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FileSelected => "file_selected",
            Self::TitleEntered => "title_entered",
            Self::TagsEntered => "tags_entered",
            Self::ConfirmPending => "confirm_pending",
            Self::Submitting => "submitting",
            Self::Done(Outcome::Success) => "done_success",
            Self::Done(Outcome::Failure) => "done_failure",
        }
    }
}

/// Values the user has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub file_path: Option<PathBuf>,
    pub title: Option<String>,
    pub tags: Vec<String>,
}

impl Draft {
    /// Furthest form step the entered values support.
    pub fn furthest_step(&self) -> Step {
        if self.file_path.is_none() {
            Step::Idle
        } else if self.title.is_none() {
            Step::FileSelected
        } else if self.tags.is_empty() {
            Step::TitleEntered
        } else {
            Step::TagsEntered
        }
    }

    /// Whether a note can be frozen from this draft.
    pub fn is_complete(&self) -> bool {
        self.furthest_step() == Step::TagsEntered
    }

    /// Removes the first tag equal to `tag`. Returns whether one was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|item| item == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    /// Freezes the current title and tags into a note awaiting content.
    pub fn freeze(&self) -> Option<Note> {
        let title = self.title.as_ref()?;
        if !self.is_complete() {
            return None;
        }
        Some(Note::new(title.clone(), self.tags.clone()))
    }
}

/// Full workflow state: one value, owned by one controller.
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub step: Step,
    pub draft: Draft,
    /// Current text of the title entry widget.
    pub title_field: String,
    pub notices: Notices,
    pub timers: Timers,
    /// Note frozen at submit time; content attached after the file read.
    pub pending: Option<Note>,
}
