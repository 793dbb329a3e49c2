//! 内存聊天记录仓储

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::chat_record::{ChatRecord, HistoryQuery};
use crate::storage::repository::ChatHistoryRepository;

/// 进程内存储，按插入顺序保存
#[derive(Debug, Default)]
pub struct MemoryHistoryRepository {
    records: RwLock<Vec<ChatRecord>>,
}

impl MemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatHistoryRepository for MemoryHistoryRepository {
    async fn append(&self, user_message: &str, bot_response: &str) -> Result<ChatRecord> {
        // id and timestamp are both assigned under the write lock
        let mut records = self.records.write().await;
        let id = records.last().map(|r| r.id + 1).unwrap_or(1);
        let mut record = ChatRecord::new(id, user_message, bot_response);
        if let Some(previous) = records.last() {
            record.timestamp = record.timestamp.max(previous.timestamp);
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn query(&self, query: &HistoryQuery) -> Result<Vec<ChatRecord>> {
        let records = self.records.read().await;
        let keyword = query.keyword();
        let matching = records
            .iter()
            .rev()
            .filter(|record| keyword.as_deref().is_none_or(|k| record.matches(k)))
            .cloned();

        Ok(match query.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.read().await.len() as u64)
    }
}
