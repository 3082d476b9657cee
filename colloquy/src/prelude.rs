//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use colloquy::prelude::*;
//! ```

pub use crate::{
    AssistantClient, AssistantGateway, ErrorClass, GatewayError, MemoryThreadStore,
    MessageObject, MessageRole, OrchestrateError, OrchestratorConfig, RunOrchestrator, RunStatus,
    StoreError, ThreadRecord, ThreadStore,
};
