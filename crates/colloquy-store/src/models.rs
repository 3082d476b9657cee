use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persisted mapping from a thread id to its service-defined metadata blob.
///
/// Records are immutable once created: writes go through insert-or-replace,
/// never partial update, and nothing in this subsystem deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub thread_id: String,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl ThreadRecord {
    pub fn new(thread_id: impl Into<String>, metadata: Value) -> Self {
        Self {
            thread_id: thread_id.into(),
            metadata,
            created_at: Utc::now(),
        }
    }
}
