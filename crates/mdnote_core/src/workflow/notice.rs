//! User-facing notices raised by the upload workflow.

use std::time::Duration;

/// How long auto-dismissed notices stay visible.
pub const NOTICE_DISPLAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    InvalidExtension,
    DuplicateTitle,
    QueryError,
    FileReadError,
    UploadCompleted,
    UploadFailed,
}

impl NoticeKind {
    /// Display duration for notices that clear themselves.
    ///
    /// `None` means the notice stays until a later user action hides it.
    pub fn auto_dismiss(self) -> Option<Duration> {
        match self {
            Self::DuplicateTitle | Self::UploadCompleted | Self::UploadFailed => {
                Some(NOTICE_DISPLAY)
            }
            Self::InvalidExtension | Self::QueryError | Self::FileReadError => None,
        }
    }

    pub fn is_error(self) -> bool {
        !matches!(self, Self::UploadCompleted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn invalid_extension() -> Self {
        Self::new(
            NoticeKind::InvalidExtension,
            "Only markdown files allowed, '.md' extension. Please, try uploading a file again",
        )
    }

    pub fn duplicate_title() -> Self {
        Self::new(
            NoticeKind::DuplicateTitle,
            "Duplicate title found from collection. Give a new title for document",
        )
    }

    pub fn query_error() -> Self {
        Self::new(NoticeKind::QueryError, "Error with making query to database.")
    }

    pub fn file_read_error(cause: &std::io::Error) -> Self {
        Self::new(
            NoticeKind::FileReadError,
            format!("Something went wrong with file read:\n{cause}"),
        )
    }

    pub fn upload_completed() -> Self {
        Self::new(NoticeKind::UploadCompleted, "Upload completed!")
    }

    pub fn upload_failed() -> Self {
        Self::new(NoticeKind::UploadFailed, "Upload failed, try again.")
    }

    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Currently visible notices, at most one per kind, in the order shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    visible: Vec<Notice>,
}

impl Notices {
    /// Shows `notice`, replacing a visible notice of the same kind.
    pub fn show(&mut self, notice: Notice) {
        match self.visible.iter_mut().find(|item| item.kind == notice.kind) {
            Some(slot) => *slot = notice,
            None => self.visible.push(notice),
        }
    }

    pub fn hide(&mut self, kind: NoticeKind) {
        self.visible.retain(|item| item.kind != kind);
    }

    pub fn get(&self, kind: NoticeKind) -> Option<&Notice> {
        self.visible.iter().find(|item| item.kind == kind)
    }

    pub fn is_visible(&self, kind: NoticeKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.visible.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Notice, NoticeKind, Notices, NOTICE_DISPLAY};

    #[test]
    fn show_replaces_same_kind_and_keeps_order() {
        let mut notices = Notices::default();
        notices.show(Notice::invalid_extension());
        notices.show(Notice::query_error());
        notices.show(Notice::invalid_extension());

        let kinds: Vec<NoticeKind> = notices.iter().map(|notice| notice.kind).collect();
        assert_eq!(
            kinds,
            vec![NoticeKind::InvalidExtension, NoticeKind::QueryError]
        );

        notices.hide(NoticeKind::InvalidExtension);
        assert!(!notices.is_visible(NoticeKind::InvalidExtension));
        assert!(notices.is_visible(NoticeKind::QueryError));
    }

    #[test]
    fn only_timed_notices_auto_dismiss() {
        assert_eq!(NoticeKind::DuplicateTitle.auto_dismiss(), Some(NOTICE_DISPLAY));
        assert_eq!(NoticeKind::UploadFailed.auto_dismiss(), Some(NOTICE_DISPLAY));
        assert_eq!(NoticeKind::FileReadError.auto_dismiss(), None);
        assert_eq!(NoticeKind::InvalidExtension.auto_dismiss(), None);
    }
}
