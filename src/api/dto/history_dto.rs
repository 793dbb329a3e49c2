use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::chat_record::ChatRecord;

/// 历史记录查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    /// 关键字
    pub q: Option<String>,
}

/// 历史记录条目
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRecordResponse {
    pub id: u64,
    pub user_message: String,
    pub bot_response: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatRecord> for ChatRecordResponse {
    fn from(record: ChatRecord) -> Self {
        Self {
            id: record.id,
            user_message: record.user_message,
            bot_response: record.bot_response,
            timestamp: record.timestamp,
        }
    }
}

/// 最近记录条目（聊天窗口加载历史使用的精简格式）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecentChatResponse {
    pub user: String,
    pub bot: String,
    pub time: DateTime<Utc>,
}

impl From<ChatRecord> for RecentChatResponse {
    fn from(record: ChatRecord) -> Self {
        Self {
            user: record.user_message,
            bot: record.bot_response,
            time: record.timestamp,
        }
    }
}
