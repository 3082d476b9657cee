use async_trait::async_trait;

use crate::error::Result;
use crate::models::ThreadRecord;

/// Durable key-value contract for thread records.
///
/// Two operations only: records are immutable once created, so there is no
/// update or delete. Implementations must be safe for concurrent use.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Idempotent insert-or-replace keyed by `record.thread_id`.
    async fn put(&self, record: ThreadRecord) -> Result<()>;

    /// Look up a record by thread id.
    async fn get(&self, thread_id: &str) -> Result<Option<ThreadRecord>>;
}
