use async_trait::async_trait;

use crate::error::Result;
use crate::types::{MessageObject, MessageRole, RunObject, ThreadObject};

/// Narrow interface over the remote assistant service.
///
/// Implementations encapsulate transport and serialization; every failure
/// comes back as a [`crate::GatewayError`] carrying exactly one
/// [`crate::ErrorClass`]. The state owned by the remote service (message
/// ordering, run lifecycle) is authoritative — nothing is cached locally.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Create a new thread upstream and return its handle.
    async fn create_thread(&self) -> Result<ThreadObject>;

    /// Append a message to a thread. Messages are immutable once appended.
    async fn append_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<MessageObject>;

    /// Ask the service to compute the next assistant turn on a thread.
    async fn submit_run(&self, thread_id: &str, instructions: &str) -> Result<RunObject>;

    /// Fetch the current state of a run.
    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<RunObject>;

    /// List a thread's messages, newest first.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<MessageObject>>;
}
