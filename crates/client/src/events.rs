//! What the controller asks the UI to do.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient notification ("toast").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Logged-out landing screen with the login/signup form.
    Landing,
    /// The authenticated catalogue.
    Browse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Notify(Notice),
    Navigate(View),
}

impl UiEvent {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Notify(Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Notify(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        })
    }
}
