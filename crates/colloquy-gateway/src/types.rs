use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Conversation handle as the remote service represents it.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadObject {
    pub id: String,
    pub created_at: i64,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageObject {
    pub id: String,
    pub thread_id: String,
    pub role: MessageRole,
    pub created_at: i64,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

impl MessageObject {
    /// Concatenated text of all text-typed content parts.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                MessageContent::Text { text } => Some(text.value.as_str()),
                MessageContent::Other => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// One content part of a message. Text is the only part this system reads;
/// image/file parts deserialize to `Other` and are skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextValue },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Completed,
    Failed,
    Cancelled,
    Expired,
}

impl RunStatus {
    /// No further transition occurs from a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One assistant-turn computation attached to a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct RunObject {
    pub id: String,
    pub thread_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

/// Page envelope the remote service wraps message listings in.
/// Messages arrive newest-first.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageList {
    pub data: Vec<MessageObject>,
    #[serde(default)]
    pub has_more: bool,
}
