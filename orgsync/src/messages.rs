//! User-facing notices emitted by the sync client.
//!
//! The client never pops UI itself; it broadcasts a [`Notice`] after every
//! surfaced failure (and after a successful seed) and the embedding
//! application decides how to show it. Subscribe via
//! [`SyncClient::notices`](crate::SyncClient::notices); dropped receivers are
//! fine, the send side ignores the absence of listeners.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub(crate) fn success(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}
