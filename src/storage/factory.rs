//! 存储工厂模块
//!
//! 根据配置创建相应的聊天记录仓储实例。

use crate::config::config::{DatabaseConfig, HistoryConfig};
use crate::error::{AppError, Result};
use crate::storage::memory::MemoryHistoryRepository;
use crate::storage::repository::ChatHistoryRepository;
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "surrealdb")]
use crate::storage::{surreal_repository::SurrealHistoryRepository, surrealdb::SurrealPool};

/// 根据 `history.backend` 创建仓储
pub async fn create_history_repository(
    history: &HistoryConfig,
    database: &DatabaseConfig,
) -> Result<Arc<dyn ChatHistoryRepository>> {
    match history.backend.as_str() {
        "memory" => {
            info!("Using in-memory chat history");
            Ok(Arc::new(MemoryHistoryRepository::new()))
        }
        #[cfg(feature = "surrealdb")]
        "surrealdb" => {
            let pool = SurrealPool::new(database.clone())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            let repository = SurrealHistoryRepository::new(&pool).await?;
            info!("Using SurrealDB chat history at {}", database.url);
            Ok(Arc::new(repository))
        }
        #[cfg(not(feature = "surrealdb"))]
        "surrealdb" => {
            let _ = database;
            Err(AppError::Config(
                "SurrealDB feature is not enabled. Enable 'surrealdb' feature to persist history."
                    .into(),
            ))
        }
        other => Err(AppError::Config(format!(
            "Unknown history backend: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::AppConfig;

    #[tokio::test]
    async fn test_memory_backend() {
        let config = AppConfig::development();
        let repo = create_history_repository(&config.history, &config.database)
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_backend_is_config_error() {
        let mut config = AppConfig::development();
        config.history.backend = "sqlite".into();
        let result = create_history_repository(&config.history, &config.database).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[cfg(feature = "surrealdb")]
    #[tokio::test]
    async fn test_surrealdb_backend_over_memory_engine() {
        let mut config = AppConfig::development();
        config.history.backend = "surrealdb".into();
        let repo = create_history_repository(&config.history, &config.database)
            .await
            .unwrap();
        let record = repo.append("hi", "Hello! How can I help you?").await.unwrap();
        assert_eq!(record.id, 1);
    }
}
