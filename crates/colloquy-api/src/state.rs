use std::sync::Arc;

use colloquy_store::ThreadStore;

use crate::config::Config;
use crate::service::ConversationService;

/// Shared application state passed to all handlers
///
/// All resources are wrapped in Arc for efficient sharing across async tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub conversations: Arc<ConversationService>,
    pub store: Arc<dyn ThreadStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        conversations: Arc<ConversationService>,
        store: Arc<dyn ThreadStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            conversations,
            store,
        }
    }
}
