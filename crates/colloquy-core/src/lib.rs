//! Drives one assistant turn per thread: append the user message, submit a
//! run, poll it to a terminal status within a deadline, extract the reply.
//! At most one run is ever in flight per thread through this orchestrator.

pub mod error;
pub mod flight;
pub mod orchestrator;

pub use error::{OrchestrateError, Result};
pub use orchestrator::{OrchestratorConfig, RunOrchestrator};
