//! # Colloquy
//!
//! Drives multi-turn conversations with a remote AI assistant service:
//! create a durable thread, append user turns, submit a run, poll it to a
//! terminal status within a deadline, and extract the assistant's reply.
//!
//! ## Overview
//!
//! The hard part is the run orchestrator: it guarantees that a thread is
//! never driven by two concurrent runs, that polling terminates (success,
//! failure, or timeout), and that transient service failures stay
//! distinguishable from permanent ones.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use colloquy::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Gateway to the remote assistant service
//!     let gateway = Arc::new(AssistantClient::new(
//!         std::env::var("OPENAI_API_KEY")?,
//!         std::env::var("OPENAI_ASSISTANT_ID")?,
//!     )?);
//!
//!     // Durable thread handle store
//!     let store = Arc::new(MemoryThreadStore::new());
//!
//!     let orchestrator = RunOrchestrator::new(
//!         gateway.clone(),
//!         store.clone(),
//!         OrchestratorConfig::default(),
//!     );
//!
//!     // One conversation turn
//!     let thread = gateway.create_thread().await?;
//!     store
//!         .put(ThreadRecord::new(thread.id.clone(), thread.metadata))
//!         .await?;
//!
//!     let reply = orchestrator
//!         .submit(&thread.id, "Hello!", "Be concise.", Duration::from_secs(30))
//!         .await?;
//!     println!("{reply}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Colloquy is organized into focused crates:
//!
//! - **`colloquy-core`**: run orchestrator with single-flight execution per thread
//! - **`colloquy-gateway`**: typed HTTP gateway for the assistant service
//! - **`colloquy-store`**: thread-record store (in-memory, MongoDB)
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use colloquy_core::{OrchestrateError, OrchestratorConfig, RunOrchestrator};

pub use colloquy_gateway::{
    AssistantClient, AssistantGateway, ErrorClass, GatewayError, MessageContent, MessageObject,
    MessageRole, RunError, RunObject, RunStatus, ThreadObject,
};

pub use colloquy_store::{MemoryThreadStore, StoreError, ThreadRecord, ThreadStore};

#[cfg(feature = "mongodb")]
pub use colloquy_store::MongoThreadStore;
