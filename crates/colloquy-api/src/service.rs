use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use colloquy_core::RunOrchestrator;
use colloquy_gateway::{AssistantGateway, MessageObject, MessageRole};
use colloquy_store::{ThreadRecord, ThreadStore};

use crate::error::{ApiError, ApiResult};

/// Caller-supplied run timeouts are capped at the router's request timeout.
const MAX_RUN_TIMEOUT: Duration = Duration::from_secs(300);

/// Thin façade between the endpoint layer and the orchestrator: validates
/// input, applies configured defaults, and keeps the thread store in step
/// with threads created upstream.
pub struct ConversationService {
    gateway: Arc<dyn AssistantGateway>,
    store: Arc<dyn ThreadStore>,
    orchestrator: Arc<RunOrchestrator>,
    instructions: String,
}

impl ConversationService {
    pub fn new(
        gateway: Arc<dyn AssistantGateway>,
        store: Arc<dyn ThreadStore>,
        orchestrator: Arc<RunOrchestrator>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            store,
            orchestrator,
            instructions: instructions.into(),
        }
    }

    /// Create a thread upstream and persist its handle.
    pub async fn create_thread(&self) -> ApiResult<ThreadRecord> {
        let thread = self.gateway.create_thread().await?;

        let created_at =
            DateTime::from_timestamp(thread.created_at, 0).unwrap_or_else(Utc::now);
        let record = ThreadRecord {
            thread_id: thread.id,
            metadata: thread.metadata,
            created_at,
        };
        self.store.put(record.clone()).await?;

        tracing::info!(thread_id = %record.thread_id, "thread created");
        Ok(record)
    }

    pub async fn get_thread(&self, thread_id: &str) -> ApiResult<ThreadRecord> {
        self.store
            .get(thread_id)
            .await?
            .ok_or_else(|| ApiError::ThreadNotFound(thread_id.to_string()))
    }

    /// Drive one user turn through the orchestrator and return the reply.
    pub async fn send_message(
        &self,
        thread_id: &str,
        prompt: &str,
        timeout: Option<Duration>,
    ) -> ApiResult<String> {
        let timeout = timeout
            .unwrap_or_else(|| self.orchestrator.default_timeout())
            .min(MAX_RUN_TIMEOUT);

        let reply = self
            .orchestrator
            .submit(thread_id, prompt, &self.instructions, timeout)
            .await?;
        Ok(reply)
    }

    /// Full transcript (newest first) plus the latest assistant text.
    pub async fn thread_messages(
        &self,
        thread_id: &str,
    ) -> ApiResult<(Vec<MessageObject>, Option<String>)> {
        if self.store.get(thread_id).await?.is_none() {
            return Err(ApiError::ThreadNotFound(thread_id.to_string()));
        }

        let messages = self.gateway.list_messages(thread_id).await?;
        let latest = messages
            .iter()
            .find(|m| m.role == MessageRole::Assistant)
            .map(|m| m.text())
            .filter(|text| !text.is_empty());

        Ok((messages, latest))
    }
}
