//! 网页搜索服务
//!
//! `SearchOracle` 是外部搜索接口的抽象：问答模式返回简短答案，
//! 链接模式返回最佳结果的标题和地址，找不到时返回 `None`。

pub mod serpapi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use serpapi::SerpApiOracle;

/// 链接模式的搜索结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLink {
    pub title: String,
    pub url: String,
}

impl SearchLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// 渲染为可在聊天窗口直接展示的超链接
    pub fn to_anchor(&self) -> String {
        format!(
            r#"<a href="{}" target="_blank" style="color:blue;">🔗 {}</a>"#,
            self.url, self.title
        )
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchOracle: Send + Sync {
    /// 问答模式
    async fn answer(&self, query: &str) -> Result<Option<String>>;

    /// 链接模式
    async fn link(&self, query: &str) -> Result<Option<SearchLink>>;
}
