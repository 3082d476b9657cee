use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::ThreadRecord;
use crate::traits::ThreadStore;

/// In-process [`ThreadStore`]. Default backend for tests and single-node
/// deployments that don't need durability across restarts.
#[derive(Default)]
pub struct MemoryThreadStore {
    records: RwLock<HashMap<String, ThreadRecord>>,
}

impl MemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThreadStore for MemoryThreadStore {
    async fn put(&self, record: ThreadRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.thread_id.clone(), record);
        Ok(())
    }

    async fn get(&self, thread_id: &str) -> Result<Option<ThreadRecord>> {
        let records = self.records.read().await;
        Ok(records.get(thread_id).cloned())
    }
}
