//! Application state - shared across all handlers.

use std::sync::Arc;

use manuscript_core::DraftService;
use manuscript_core::ports::DraftStore;
use manuscript_infra::InMemoryDraftStore;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub drafts: Arc<DraftService>,
}

impl AppState {
    /// Build the application state with the appropriate store backend.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let store: Arc<dyn DraftStore> = {
            if let Some(db_config) = &config.database {
                match manuscript_infra::store::connect(db_config).await {
                    Ok(conn) => Arc::new(manuscript_infra::PostgresDraftStore::new(conn)),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Arc::new(InMemoryDraftStore::new())
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryDraftStore::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let store: Arc<dyn DraftStore> = {
            tracing::info!("Running without postgres feature - using in-memory store");
            Arc::new(InMemoryDraftStore::new())
        };

        let drafts = Arc::new(DraftService::new(store, config.gate_timeouts.clone()));

        tracing::info!("Application state initialized");

        Self { drafts }
    }
}
