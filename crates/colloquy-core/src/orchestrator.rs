use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use colloquy_gateway::{AssistantGateway, MessageRole, RunStatus};
use colloquy_store::ThreadStore;

use crate::error::{OrchestrateError, Result};
use crate::flight::FlightRegistry;

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Fixed interval between run-status polls. Runs finish in seconds, so a
    /// constant short interval beats backoff on added latency.
    pub poll_interval: Duration,
    /// Wall-clock bound applied when the caller doesn't supply one.
    pub default_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(200),
            default_timeout: Duration::from_secs(60),
        }
    }
}

/// Coordinates gateway calls into one completed assistant turn per
/// invocation, enforcing single-flight execution per thread.
///
/// Holds no background tasks; the only shared mutable state is the flight
/// registry. Gateway and store arrive as explicit dependencies.
pub struct RunOrchestrator {
    gateway: Arc<dyn AssistantGateway>,
    store: Arc<dyn ThreadStore>,
    config: OrchestratorConfig,
    flights: FlightRegistry,
}

impl RunOrchestrator {
    pub fn new(
        gateway: Arc<dyn AssistantGateway>,
        store: Arc<dyn ThreadStore>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            gateway,
            store,
            config,
            flights: FlightRegistry::new(),
        }
    }

    pub fn default_timeout(&self) -> Duration {
        self.config.default_timeout
    }

    /// Drive one user turn to completion and return the assistant's reply.
    ///
    /// Fails fast with [`OrchestrateError::RunInProgress`] if the thread
    /// already has a run in flight — concurrent turns on one thread are a
    /// caller error, and silently serializing them would hide latency and
    /// ordering from the caller. On timeout the remote run is left
    /// outstanding; callers should check status later, not resubmit.
    pub async fn submit(
        &self,
        thread_id: &str,
        user_text: &str,
        instructions: &str,
        timeout: Duration,
    ) -> Result<String> {
        if user_text.trim().is_empty() {
            return Err(OrchestrateError::EmptyUserText(thread_id.to_string()));
        }

        if self.store.get(thread_id).await?.is_none() {
            return Err(OrchestrateError::ThreadNotFound(thread_id.to_string()));
        }

        let _flight = self
            .flights
            .try_begin(thread_id)
            .ok_or_else(|| OrchestrateError::RunInProgress(thread_id.to_string()))?;

        // Guard held for the rest of the invocation; its Drop releases the
        // slot on every exit path, including cancellation mid-poll.
        self.drive(thread_id, user_text, instructions, timeout).await
    }

    async fn drive(
        &self,
        thread_id: &str,
        user_text: &str,
        instructions: &str,
        timeout: Duration,
    ) -> Result<String> {
        self.gateway
            .append_message(thread_id, MessageRole::User, user_text)
            .await
            .map_err(OrchestrateError::gateway)?;

        let run = self
            .gateway
            .submit_run(thread_id, instructions)
            .await
            .map_err(OrchestrateError::gateway)?;
        tracing::info!(thread_id, run_id = %run.id, "run submitted");

        self.poll(thread_id, &run.id, timeout).await?;

        let reply = self.latest_assistant_text(thread_id).await?;
        tracing::info!(thread_id, run_id = %run.id, "run completed");
        Ok(reply)
    }

    /// Poll the run until terminal, bounded by `timeout` wall-clock.
    async fn poll(&self, thread_id: &str, run_id: &str, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;

        loop {
            let run = self
                .gateway
                .run_status(thread_id, run_id)
                .await
                .map_err(OrchestrateError::gateway)?;
            tracing::debug!(thread_id, run_id, status = %run.status, "run status");

            match run.status {
                RunStatus::Completed => return Ok(()),
                status if status.is_terminal() => {
                    return Err(OrchestrateError::RunFailed {
                        run_id: run_id.to_string(),
                        status,
                    });
                }
                _ => {}
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(thread_id, run_id, "run still incomplete at deadline");
                return Err(OrchestrateError::RunTimeout {
                    run_id: run_id.to_string(),
                    timeout,
                });
            }

            // Never sleeps past the deadline; dropping the future here
            // releases the flight slot via the guard.
            tokio::time::sleep_until(deadline.min(now + self.config.poll_interval)).await;
        }
    }

    /// The reply is the newest assistant-role message on the thread.
    async fn latest_assistant_text(&self, thread_id: &str) -> Result<String> {
        let messages = self
            .gateway
            .list_messages(thread_id)
            .await
            .map_err(OrchestrateError::gateway)?;

        // Listing order is newest-first.
        let reply = messages
            .iter()
            .find(|m| m.role == MessageRole::Assistant)
            .map(|m| m.text());

        match reply {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(OrchestrateError::NoAssistantReply(thread_id.to_string())),
        }
    }
}
