use std::time::Duration;

use thiserror::Error;

use colloquy_gateway::{ErrorClass, GatewayError, RunStatus};
use colloquy_store::StoreError;

#[derive(Debug, Error)]
pub enum OrchestrateError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("A run is already in flight for thread {0}")]
    RunInProgress(String),

    #[error("Empty prompt for thread {0}")]
    EmptyUserText(String),

    /// Append/submit/poll call to the remote service failed. The original
    /// classification is preserved so callers can decide on retry policy.
    #[error("Assistant gateway unavailable ({class}): {source}")]
    GatewayUnavailable {
        class: ErrorClass,
        #[source]
        source: GatewayError,
    },

    #[error("Run {run_id} ended in status {status}")]
    RunFailed { run_id: String, status: RunStatus },

    /// The run is left outstanding upstream — check its status later
    /// instead of resubmitting.
    #[error("Run {run_id} still incomplete after {}ms", timeout.as_millis())]
    RunTimeout { run_id: String, timeout: Duration },

    #[error("No assistant reply on thread {0}")]
    NoAssistantReply(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl OrchestrateError {
    pub(crate) fn gateway(source: GatewayError) -> Self {
        OrchestrateError::GatewayUnavailable {
            class: source.class(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrchestrateError>;
