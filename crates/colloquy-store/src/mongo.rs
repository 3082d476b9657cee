use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{bson::doc, Client, Collection};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::models::ThreadRecord;
use crate::traits::ThreadStore;

const COLLECTION: &str = "threads";

/// Document layout for the `threads` collection, keyed by the upstream
/// thread id rather than an ObjectId.
#[derive(Debug, Serialize, Deserialize)]
struct MongoThreadRecord {
    #[serde(rename = "_id")]
    thread_id: String,
    metadata: bson::Bson,
    created_at: DateTime<Utc>,
}

impl MongoThreadRecord {
    fn into_record(self) -> ThreadRecord {
        ThreadRecord {
            thread_id: self.thread_id,
            metadata: self.metadata.into_relaxed_extjson(),
            created_at: self.created_at,
        }
    }
}

/// MongoDB-backed [`ThreadStore`].
pub struct MongoThreadStore {
    collection: Collection<MongoThreadRecord>,
}

impl MongoThreadStore {
    /// Connect to MongoDB and create the store.
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self::with_client(&client, database))
    }

    /// Build the store from an existing client.
    pub fn with_client(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection(COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl ThreadStore for MongoThreadStore {
    async fn put(&self, record: ThreadRecord) -> Result<()> {
        let document = MongoThreadRecord {
            thread_id: record.thread_id,
            metadata: bson::to_bson(&record.metadata)?,
            created_at: record.created_at,
        };

        self.collection
            .replace_one(doc! { "_id": &document.thread_id }, &document)
            .upsert(true)
            .await?;

        tracing::debug!(thread_id = %document.thread_id, "thread record persisted");
        Ok(())
    }

    async fn get(&self, thread_id: &str) -> Result<Option<ThreadRecord>> {
        let document = self
            .collection
            .find_one(doc! { "_id": thread_id })
            .await?;

        Ok(document.map(MongoThreadRecord::into_record))
    }
}
