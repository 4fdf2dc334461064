//! Shared application state for the web server.

use std::sync::Arc;

use attune_db::AuditStore;
use attune_llm::backend::{LlmBackend, OpenAiBackend};
use attune_llm::gateway::CompletionGateway;

use crate::config::RelayConfig;

/// Shared state injected into every axum handler. Components are immutable
/// after startup; the pool inside the store is the only shared resource.
pub struct AppState {
    pub gateway: CompletionGateway,
    pub store: AuditStore,
}

impl AppState {
    pub fn new(gateway: CompletionGateway, store: AuditStore) -> Self {
        Self { gateway, store }
    }

    /// Wire the components from configuration. A missing credential leaves
    /// the gateway unconfigured (fallback replies) rather than failing.
    pub fn from_config(config: &RelayConfig) -> Self {
        let backend = config.openai_api_key.as_deref().map(|key| {
            let mut backend = OpenAiBackend::new(key, &config.openai_model);
            if let Some(base_url) = &config.openai_base_url {
                backend = backend.with_base_url(base_url);
            }
            Arc::new(backend) as Arc<dyn LlmBackend>
        });
        if backend.is_none() {
            tracing::warn!("OPENAI_API_KEY not set, every reply will be the fallback message");
        }

        Self {
            gateway: CompletionGateway::new(backend, config.persona.clone()),
            store: AuditStore::connect(config.database_url.as_deref()),
        }
    }
}

pub type SharedState = Arc<AppState>;
