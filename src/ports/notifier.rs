//! Notifier outbound port. Non-blocking user notices (success / failure).

/// Severity of a user notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short message shown to the user without interrupting the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Port for surfacing notices. Implementations must not fail the caller.
pub trait NotifierPort: Send + Sync {
    fn notify(&self, notice: Notice);
}
