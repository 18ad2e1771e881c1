//! Plain-text rendering of the form view.

use mdnote_core::workflow::view::{DIALOG_DISMISS, DIALOG_TITLE, TAG_PLACEHOLDER};
use mdnote_core::{FormView, Notice};

pub fn render(view: &FormView) -> String {
    let mut lines = Vec::new();

    if view.progress_visible {
        lines.push("Uploading...".to_string());
    }
    if let Some(label) = &view.file_label {
        lines.push(label.clone());
    }
    if view.title_input_visible {
        let field = if view.title_field.is_empty() {
            view.title_placeholder.to_string()
        } else {
            view.title_field.clone()
        };
        lines.push(format!("  title> {field}"));
    }
    if let Some(label) = &view.title_label {
        lines.push(label.clone());
    }
    if view.tag_input_visible {
        lines.push(format!("  tag> {TAG_PLACEHOLDER}"));
    }
    if !view.tags.is_empty() {
        let chips: Vec<String> = view.tags.iter().map(|tag| format!("[{tag} x]")).collect();
        lines.push(format!("Tags: {}", chips.join(" ")));
    }
    if view.submit_visible {
        lines.push("Submit to database: `submit`".to_string());
    }
    if let Some(summary) = &view.dialog {
        lines.push(format!("== {DIALOG_TITLE} =="));
        lines.push(summary.body());
        lines.push(format!("[{DIALOG_DISMISS}]: `confirm`"));
    }
    for notice in &view.notices {
        lines.push(render_notice(notice));
    }
    if lines.is_empty() {
        lines.push("Open file: `open <path>`".to_string());
    }

    lines.join("\n")
}

pub fn render_notice(notice: &Notice) -> String {
    let marker = if notice.kind.is_error() { "!" } else { "*" };
    format!("{marker} {}", notice.text)
}

#[cfg(test)]
mod tests {
    use super::render;
    use mdnote_core::workflow::WorkflowState;
    use mdnote_core::{FormView, Step};
    use std::path::PathBuf;

    #[test]
    fn empty_form_prompts_for_file() {
        let text = render(&FormView::project(&WorkflowState::default()));
        assert_eq!(text, "Open file: `open <path>`");
    }

    #[test]
    fn filled_form_lists_tags_and_submit_hint() {
        let mut state = WorkflowState::default();
        state.draft.file_path = Some(PathBuf::from("/notes/todo.md"));
        state.draft.title = Some("Todo List".to_string());
        state.draft.tags = vec!["WORK".to_string(), "URGENT".to_string()];
        state.step = Step::TagsEntered;

        let text = render(&FormView::project(&state));
        assert!(text.contains("File: todo.md"));
        assert!(text.contains("Title: Todo List"));
        assert!(text.contains("Tags: [WORK x] [URGENT x]"));
        assert!(text.contains("`submit`"));
    }
}
