use async_trait::async_trait;

use crate::error::Result;
use crate::models::chat_record::{ChatRecord, HistoryQuery};

/// 聊天记录仓储 trait
///
/// 写入失败会原样向上传播，调用方据此让整个请求失败。
#[async_trait]
pub trait ChatHistoryRepository: Send + Sync {
    /// 追加一条记录，分配递增 id 和当前时间
    async fn append(&self, user_message: &str, bot_response: &str) -> Result<ChatRecord>;

    /// 按 id 倒序（最新在前）查询，可按关键字过滤并限制条数
    async fn query(&self, query: &HistoryQuery) -> Result<Vec<ChatRecord>>;

    /// 统计记录数
    async fn count(&self) -> Result<u64>;

    /// 最近的 `limit` 条记录
    async fn recent(&self, limit: usize) -> Result<Vec<ChatRecord>> {
        self.query(&HistoryQuery::recent(limit)).await
    }
}
