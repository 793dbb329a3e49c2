use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一条对话记录（用户输入 + 机器人回复）
///
/// `id` 严格递增，`timestamp` 随 `id` 单调不减。创建后不再修改或删除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: u64,
    pub user_message: String,
    pub bot_response: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatRecord {
    pub fn new(id: u64, user_message: impl Into<String>, bot_response: impl Into<String>) -> Self {
        Self {
            id,
            user_message: user_message.into(),
            bot_response: bot_response.into(),
            timestamp: Utc::now(),
        }
    }

    /// 关键字（大小写不敏感）出现在输入或回复中
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.user_message.to_lowercase().contains(&keyword)
            || self.bot_response.to_lowercase().contains(&keyword)
    }
}

/// 历史记录查询条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// 为空或 None 表示不过滤
    pub keyword: Option<String>,
    /// None 表示不限条数（全量导出）
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn recent(limit: usize) -> Self {
        Self {
            keyword: None,
            limit: Some(limit),
        }
    }

    pub fn filtered(keyword: impl Into<String>, limit: usize) -> Self {
        Self {
            keyword: Some(keyword.into()),
            limit: Some(limit),
        }
    }

    /// 规范化后的关键字；空白关键字视为不过滤
    pub fn keyword(&self) -> Option<String> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_lowercase)
    }
}
