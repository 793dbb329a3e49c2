use crate::config::config::AppConfig;
use crate::observability::AppMetrics;
use crate::router::ChatRouter;
use crate::storage::repository::ChatHistoryRepository;
use std::sync::Arc;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Message router (intent model, catalog, search oracle)
    pub router: Arc<ChatRouter>,
    /// Chat history repository
    pub history: Arc<dyn ChatHistoryRepository>,
    /// Loaded configuration
    pub config: Arc<AppConfig>,
    /// Request and routing counters
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("router", &"Arc<ChatRouter>")
            .field("history", &"Arc<dyn ChatHistoryRepository>")
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl AppState {
    /// Create new application state; metrics are shared with the router
    pub fn new(
        router: ChatRouter,
        history: Arc<dyn ChatHistoryRepository>,
        config: AppConfig,
    ) -> Self {
        let metrics = router.metrics().clone();
        Self {
            router: Arc::new(router),
            history,
            config: Arc::new(config),
            metrics,
        }
    }
}
