//! Toolkit-independent projection of the form for the presentation shell.
//!
//! The shell renders a [`FormView`] and owns no workflow logic.

use super::notice::Notice;
use super::state::{Step, WorkflowState};
use std::path::{Path, PathBuf};

pub const TITLE_PLACEHOLDER: &str = "Provide title for the file";
pub const RENAME_PLACEHOLDER: &str = "Rename the title";
pub const TAG_PLACEHOLDER: &str = "Write tag and press enter to insert another tag";
pub const DIALOG_TITLE: &str = "Data to be submitted";
pub const DIALOG_DISMISS: &str = "Submit";

/// Human-readable summary shown before the upload is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub path: PathBuf,
    pub title: String,
    pub tags: Vec<String>,
}

impl SubmissionSummary {
    pub fn body(&self) -> String {
        format!(
            "Filepath: {}\n\nTitle: {}\n\nTags: {}",
            self.path.display(),
            self.title,
            self.tags.join(", ")
        )
    }
}

/// Which widgets are visible and what they contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub step: Step,
    /// `File: <name>` once a markdown file is selected.
    pub file_label: Option<String>,
    pub title_input_visible: bool,
    pub title_placeholder: &'static str,
    pub title_field: String,
    /// `Title: <title>` once a title passed the duplicate check.
    pub title_label: Option<String>,
    pub tag_input_visible: bool,
    pub tags: Vec<String>,
    pub submit_visible: bool,
    pub dialog: Option<SubmissionSummary>,
    pub progress_visible: bool,
    pub notices: Vec<Notice>,
}

impl FormView {
    pub fn project(state: &WorkflowState) -> Self {
        let draft = &state.draft;
        let form_visible = matches!(
            state.step,
            Step::Idle
                | Step::FileSelected
                | Step::TitleEntered
                | Step::TagsEntered
                | Step::ConfirmPending
        );

        let dialog = match (state.step, &state.pending, &draft.file_path) {
            (Step::ConfirmPending, Some(note), Some(path)) => Some(SubmissionSummary {
                path: path.clone(),
                title: note.title.clone(),
                tags: note.tags.clone(),
            }),
            _ => None,
        };

        Self {
            step: state.step,
            file_label: draft
                .file_path
                .as_deref()
                .filter(|_| form_visible)
                .map(|path| format!("File: {}", file_name(path))),
            title_input_visible: form_visible && draft.file_path.is_some(),
            title_placeholder: if draft.title.is_some() {
                RENAME_PLACEHOLDER
            } else {
                TITLE_PLACEHOLDER
            },
            title_field: state.title_field.clone(),
            title_label: draft
                .title
                .as_ref()
                .filter(|_| form_visible)
                .map(|title| format!("Title: {title}")),
            tag_input_visible: form_visible && draft.title.is_some(),
            tags: if form_visible {
                draft.tags.clone()
            } else {
                Vec::new()
            },
            submit_visible: matches!(state.step, Step::TagsEntered | Step::Idle)
                && draft.is_complete(),
            dialog,
            progress_visible: state.step == Step::Submitting,
            notices: state.notices.iter().cloned().collect(),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::{FormView, SubmissionSummary, RENAME_PLACEHOLDER, TITLE_PLACEHOLDER};
    use crate::workflow::state::{Step, WorkflowState};
    use std::path::PathBuf;

    #[test]
    fn initial_view_shows_only_file_picker() {
        let view = FormView::project(&WorkflowState::default());
        assert_eq!(view.file_label, None);
        assert!(!view.title_input_visible);
        assert!(!view.tag_input_visible);
        assert!(!view.submit_visible);
        assert_eq!(view.title_placeholder, TITLE_PLACEHOLDER);
        assert!(view.dialog.is_none());
    }

    #[test]
    fn entered_values_expose_following_inputs() {
        let mut state = WorkflowState::default();
        state.draft.file_path = Some(PathBuf::from("/home/ada/notes/todo.md"));
        state.draft.title = Some("Todo List".to_string());
        state.draft.tags = vec!["WORK".to_string()];
        state.step = Step::TagsEntered;

        let view = FormView::project(&state);
        assert_eq!(view.file_label.as_deref(), Some("File: todo.md"));
        assert_eq!(view.title_label.as_deref(), Some("Title: Todo List"));
        assert_eq!(view.title_placeholder, RENAME_PLACEHOLDER);
        assert!(view.tag_input_visible);
        assert!(view.submit_visible);
    }

    #[test]
    fn summary_body_lists_path_title_and_joined_tags() {
        let summary = SubmissionSummary {
            path: PathBuf::from("/tmp/todo.md"),
            title: "Todo List".to_string(),
            tags: vec!["WORK".to_string(), "URGENT".to_string()],
        };
        assert_eq!(
            summary.body(),
            "Filepath: /tmp/todo.md\n\nTitle: Todo List\n\nTags: WORK, URGENT"
        );
    }
}
