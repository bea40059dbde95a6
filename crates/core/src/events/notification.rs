//! User notification types.

use serde::{Deserialize, Serialize};

/// Severity of a user notification, matching the front-end toast levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Something went wrong and the user should know.
    Danger,
    /// Informational, e.g. "data updated".
    Info,
}

/// A user-visible notification emitted by the sync services.
///
/// These are facts about what happened ("product X updated", "network
/// error"), not rendering instructions; the sink decides how to display
/// them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNotification {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl UserNotification {
    /// Creates a danger notification.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Danger,
            title: None,
        }
    }

    /// Creates an info notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
            title: None,
        }
    }

    /// Attaches a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
