//! Upload workflow controller.
//!
//! # Responsibility
//! - Own the single `WorkflowState` value for one form session.
//! - Run each user event to completion against the store gateway.
//! - Fire deferred notice dismissals and post-submission resets.
//!
//! # Invariants
//! - Events outside the acceptance table leave state untouched.
//! - A note reaches the gateway only after its title passed the duplicate
//!   check and its content was read from disk.
//! - The insert runs from `advance`, so `Submitting` is observable between
//!   the confirming event and the outcome.
//! - While `Idle` with entries retained, events are accepted as on the
//!   furthest step those entries support.
//! - A successful upload resets everything; a failed one keeps path, title
//!   and tags so the user can retry without re-entering them.

use super::event::{is_accepted, Event, EventKind};
use super::notice::{Notice, NoticeKind, NOTICE_DISPLAY};
use super::state::{Outcome, Step, WorkflowState};
use super::timer::TimerAction;
use super::view::FormView;
use crate::model::note::{normalize_tag, MARKDOWN_EXTENSION};
use crate::store::NoteGateway;
use log::{debug, error, info, warn};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Result of delivering one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The event was handled and the step changed.
    Moved { from: Step, to: Step },
    /// The event was handled without changing the step.
    Held(Step),
    /// The event is not valid on the current step.
    Rejected { step: Step, event: EventKind },
}

/// Single-session controller driving the upload form.
///
/// Notices raised by the latest `dispatch` or `advance` call are kept until
/// [`UploadWorkflow::drain_raised`] or the next such call; visible notices
/// are always part of [`UploadWorkflow::view`].
pub struct UploadWorkflow<G: NoteGateway> {
    gateway: G,
    state: WorkflowState,
    raised: Vec<Notice>,
}

impl<G: NoteGateway> UploadWorkflow<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: WorkflowState::default(),
            raised: Vec::new(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn view(&self) -> FormView {
        FormView::project(&self.state)
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.timers.next_deadline()
    }

    /// Returns notices raised by the latest `dispatch` or `advance`, in raise
    /// order.
    pub fn drain_raised(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.raised)
    }

    /// Hands the gateway back for shutdown.
    pub fn into_gateway(self) -> G {
        self.gateway
    }

    /// Delivers one user event at `now`.
    pub fn dispatch(&mut self, event: Event, now: Instant) -> Dispatch {
        self.raised.clear();
        let from = self.state.step;
        let kind = event.kind();
        if !is_accepted(self.acceptance_step(), kind) {
            debug!(
                "event=workflow_reject module=workflow step={} input={}",
                from.as_str(),
                kind.as_str()
            );
            return Dispatch::Rejected {
                step: from,
                event: kind,
            };
        }

        let handled = match event {
            Event::FilePicked(path) => self.on_file_picked(path),
            Event::TitleSubmitted(title) => self.on_title_submitted(title, now),
            Event::TagSubmitted(tag) => self.on_tag_submitted(&tag),
            Event::TagRemoved(tag) => self.on_tag_removed(&tag),
            Event::SubmitRequested => self.on_submit_requested(),
            Event::ConfirmationDismissed => self.on_confirmation_dismissed(now),
        };
        if !handled {
            return Dispatch::Rejected {
                step: from,
                event: kind,
            };
        }

        let to = self.state.step;
        if from == to {
            Dispatch::Held(to)
        } else {
            info!(
                "event=workflow_transition module=workflow from={} to={} input={}",
                from.as_str(),
                to.as_str(),
                kind.as_str()
            );
            Dispatch::Moved { from, to }
        }
    }

    /// Runs timer actions that are due at `now` and returns them.
    pub fn advance(&mut self, now: Instant) -> Vec<TimerAction> {
        self.raised.clear();
        let due = self.state.timers.take_due(now);
        for action in &due {
            match action {
                TimerAction::DismissNotice(kind) => self.state.notices.hide(*kind),
                TimerAction::InsertPending => self.insert_pending(now),
                TimerAction::FinishSubmission => self.finish_submission(),
            }
        }
        due
    }

    fn on_file_picked(&mut self, path: PathBuf) -> bool {
        if !has_markdown_extension(&path) {
            warn!(
                "event=file_select module=workflow status=rejected extension={}",
                path.extension()
                    .map(|ext| ext.to_string_lossy().into_owned())
                    .unwrap_or_default()
            );
            self.raise(Notice::invalid_extension(), None);
            return true;
        }

        let absolute = std::path::absolute(&path).unwrap_or(path);
        info!(
            "event=file_select module=workflow status=ok path={}",
            absolute.display()
        );
        self.state.notices.hide(NoticeKind::InvalidExtension);
        self.state.notices.hide(NoticeKind::FileReadError);
        self.state.draft.file_path = Some(absolute);
        self.state.step = self.state.draft.furthest_step();
        true
    }

    fn on_title_submitted(&mut self, title: String, now: Instant) -> bool {
        self.state.title_field = title;
        if self.state.title_field.trim().is_empty() {
            return true;
        }

        self.state.notices.hide(NoticeKind::QueryError);
        match self.gateway.count_by_title(&self.state.title_field) {
            Err(err) => {
                error!("event=title_check module=workflow status=error error={err}");
                self.raise(Notice::query_error(), None);
            }
            Ok(count) if count > 0 => {
                info!("event=title_check module=workflow status=duplicate count={count}");
                self.state.title_field.clear();
                self.raise(Notice::duplicate_title(), Some(now));
            }
            Ok(_) => {
                let title = std::mem::take(&mut self.state.title_field);
                self.state.notices.hide(NoticeKind::DuplicateTitle);
                self.state
                    .timers
                    .cancel(TimerAction::DismissNotice(NoticeKind::DuplicateTitle));
                self.state.draft.title = Some(title);
                self.state.step = self.state.draft.furthest_step();
            }
        }
        true
    }

    fn on_tag_submitted(&mut self, tag: &str) -> bool {
        if let Some(tag) = normalize_tag(tag) {
            debug!("event=tag_add module=workflow tag={tag}");
            self.state.draft.tags.push(tag);
            self.state.step = Step::TagsEntered;
        }
        true
    }

    fn on_tag_removed(&mut self, tag: &str) -> bool {
        let Some(tag) = normalize_tag(tag) else {
            return true;
        };
        if self.state.draft.remove_tag(&tag) {
            debug!("event=tag_remove module=workflow tag={tag}");
            self.state.step = self.state.draft.furthest_step();
        }
        true
    }

    fn on_submit_requested(&mut self) -> bool {
        let Some(note) = self.state.draft.freeze() else {
            return false;
        };
        info!(
            "event=submit_review module=workflow title_len={} tags={}",
            note.title.len(),
            note.tags.len()
        );
        self.state.pending = Some(note);
        self.state.step = Step::ConfirmPending;
        true
    }

    fn on_confirmation_dismissed(&mut self, now: Instant) -> bool {
        let (Some(path), Some(note)) = (
            self.state.draft.file_path.clone(),
            self.state.pending.clone(),
        ) else {
            return false;
        };

        self.state.notices.hide(NoticeKind::FileReadError);
        let content = match std::fs::read(&path) {
            Ok(content) => content,
            Err(err) => {
                error!(
                    "event=file_read module=workflow status=error path={} error={}",
                    path.display(),
                    err
                );
                self.raise(Notice::file_read_error(&err), None);
                return true;
            }
        };

        self.state.pending = Some(note.with_content(content));
        self.state.step = Step::Submitting;
        self.state
            .timers
            .schedule(now, Duration::ZERO, TimerAction::InsertPending);
        true
    }

    fn insert_pending(&mut self, now: Instant) {
        if self.state.step != Step::Submitting {
            return;
        }
        // The frozen note leaves the workflow here; only the draft survives.
        let Some(note) = self.state.pending.take() else {
            return;
        };
        let outcome = if self.gateway.insert_note(&note) {
            self.raise(Notice::upload_completed(), Some(now));
            Outcome::Success
        } else {
            self.raise(Notice::upload_failed(), Some(now));
            Outcome::Failure
        };
        self.state.step = Step::Done(outcome);
        self.state
            .timers
            .schedule(now, NOTICE_DISPLAY, TimerAction::FinishSubmission);
    }

    fn finish_submission(&mut self) {
        match self.state.step {
            Step::Done(Outcome::Success) => {
                self.state = WorkflowState::default();
                info!("event=workflow_reset module=workflow status=ok");
            }
            Step::Done(Outcome::Failure) => {
                self.state.notices.hide(NoticeKind::UploadFailed);
                self.state.step = Step::Idle;
                info!("event=workflow_reset module=workflow status=retained");
            }
            _ => {}
        }
    }

    /// Step used for the acceptance check. A retained draft on `Idle` behaves
    /// like the step its entries support.
    fn acceptance_step(&self) -> Step {
        match self.state.step {
            Step::Idle => self.state.draft.furthest_step(),
            step => step,
        }
    }

    /// Shows `notice`; timed notices get a dismissal scheduled from `now`.
    fn raise(&mut self, notice: Notice, now: Option<Instant>) {
        if let (Some(now), Some(after)) = (now, notice.kind.auto_dismiss()) {
            self.state
                .timers
                .schedule(now, after, TimerAction::DismissNotice(notice.kind));
        }
        self.state.notices.show(notice.clone());
        self.raised.push(notice);
    }
}

fn has_markdown_extension(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(MARKDOWN_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::has_markdown_extension;
    use std::path::Path;

    #[test]
    fn extension_check_is_literal_and_case_sensitive() {
        assert!(has_markdown_extension(Path::new("notes/todo.md")));
        assert!(!has_markdown_extension(Path::new("notes/TODO.MD")));
        assert!(!has_markdown_extension(Path::new("report.txt")));
        assert!(!has_markdown_extension(Path::new("archive.md.bak")));
        assert!(!has_markdown_extension(Path::new(".md")));
    }
}
