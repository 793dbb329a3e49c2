//! SurrealDB 聊天记录仓储

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{Surreal, engine::any::Any};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::chat_record::{ChatRecord, HistoryQuery};
use crate::storage::repository::ChatHistoryRepository;
use crate::storage::surrealdb::SurrealPool;

const TABLE: &str = "chat_history";

/// 表中的一行；记录 id 为 `chat_history:<seq>`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatRow {
    seq: u64,
    user_message: String,
    bot_response: String,
    /// RFC 3339
    timestamp: String,
}

impl TryFrom<ChatRow> for ChatRecord {
    type Error = AppError;

    fn try_from(row: ChatRow) -> Result<Self> {
        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .map_err(|e| {
                AppError::Database(format!("Invalid timestamp {}: {}", row.timestamp, e))
            })?
            .with_timezone(&Utc);

        Ok(ChatRecord {
            id: row.seq,
            user_message: row.user_message,
            bot_response: row.bot_response,
            timestamp,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SeqRow {
    seq: u64,
}

#[derive(Debug)]
struct Sequence {
    last_id: u64,
    last_timestamp: Option<DateTime<Utc>>,
}

/// 聊天记录仓储实现
///
/// 追加操作在 `sequence` 锁内完成，保证并发写入时 id 严格递增。
pub struct SurrealHistoryRepository {
    db: Surreal<Any>,
    sequence: Mutex<Sequence>,
}

impl SurrealHistoryRepository {
    /// 从已有数据中恢复序列号
    pub async fn new(pool: &SurrealPool) -> Result<Self> {
        let db = pool.inner();
        let query = format!("SELECT seq FROM {} ORDER BY seq DESC LIMIT 1", TABLE);
        let last: Vec<SeqRow> = db.query(query).await?.take(0)?;
        let last_id = last.first().map(|row| row.seq).unwrap_or(0);
        debug!("Chat history sequence resumes after {}", last_id);

        Ok(Self {
            db,
            sequence: Mutex::new(Sequence {
                last_id,
                last_timestamp: None,
            }),
        })
    }
}

#[async_trait]
impl ChatHistoryRepository for SurrealHistoryRepository {
    async fn append(&self, user_message: &str, bot_response: &str) -> Result<ChatRecord> {
        let mut sequence = self.sequence.lock().await;
        let id = sequence.last_id + 1;
        let timestamp = match sequence.last_timestamp {
            Some(last) => Utc::now().max(last),
            None => Utc::now(),
        };

        let row = ChatRow {
            seq: id,
            user_message: user_message.to_string(),
            bot_response: bot_response.to_string(),
            timestamp: timestamp.to_rfc3339(),
        };

        let query = format!("CREATE type::thing('{}', $seq) CONTENT $row RETURN NONE", TABLE);
        self.db
            .query(query)
            .bind(("seq", id))
            .bind(("row", row))
            .await?
            .check()?;

        sequence.last_id = id;
        sequence.last_timestamp = Some(timestamp);

        Ok(ChatRecord {
            id,
            user_message: user_message.to_string(),
            bot_response: bot_response.to_string(),
            timestamp,
        })
    }

    async fn query(&self, query: &HistoryQuery) -> Result<Vec<ChatRecord>> {
        let keyword = query.keyword();

        let mut statement = format!(
            "SELECT seq, user_message, bot_response, timestamp FROM {}",
            TABLE
        );
        if keyword.is_some() {
            statement.push_str(
                " WHERE string::contains(string::lowercase(user_message), $keyword) \
                 OR string::contains(string::lowercase(bot_response), $keyword)",
            );
        }
        statement.push_str(" ORDER BY seq DESC");
        if query.limit.is_some() {
            statement.push_str(" LIMIT $limit");
        }

        let mut request = self.db.query(statement);
        if let Some(keyword) = keyword {
            request = request.bind(("keyword", keyword));
        }
        if let Some(limit) = query.limit {
            request = request.bind(("limit", limit));
        }

        let rows: Vec<ChatRow> = request.await?.take(0)?;
        rows.into_iter().map(ChatRecord::try_from).collect()
    }

    async fn count(&self) -> Result<u64> {
        let query = format!("RETURN count(SELECT seq FROM {})", TABLE);
        let count: Option<u64> = self.db.query(query).await?.take(0)?;
        Ok(count.unwrap_or(0))
    }
}
