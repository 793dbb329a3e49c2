//! 消息路由
//!
//! 对规范化后的输入按固定顺序匹配规则（链接 > 问题 > 意图），
//! 第一条命中的规则决定回复策略。每次处理完成后追加一条聊天记录。

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::catalog::ResponseCatalog;
use crate::error::{AppError, Result};
use crate::intent::IntentModel;
use crate::observability::AppMetrics;
use crate::oracle::SearchOracle;
use crate::storage::repository::ChatHistoryRepository;

pub const NO_LINK_MESSAGE: &str = "Sorry, I couldn’t find a link for that.";
pub const NO_ANSWER_MESSAGE: &str = "Sorry, I couldn't find an answer.";

pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(10);

/// 回复策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingDecision {
    /// 搜索链接模式
    LinkLookup,
    /// 搜索问答模式
    WebSearch,
    /// 意图识别 + 固定回复
    IntentReply,
}

impl RoutingDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingDecision::LinkLookup => "link_lookup",
            RoutingDecision::WebSearch => "web_search",
            RoutingDecision::IntentReply => "intent_reply",
        }
    }
}

impl fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 路由规则：谓词作用于规范化（trim + 小写）后的输入
#[derive(Debug, Clone, Copy)]
pub struct RoutingRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub decision: RoutingDecision,
}

fn mentions_link(input: &str) -> bool {
    input.contains("link") || input.contains("website")
}

fn is_question(input: &str) -> bool {
    input.contains('?')
}

fn always(_: &str) -> bool {
    true
}

/// 按优先级排列，最后一条兜底
pub const ROUTING_RULES: &[RoutingRule] = &[
    RoutingRule {
        name: "link",
        matches: mentions_link,
        decision: RoutingDecision::LinkLookup,
    },
    RoutingRule {
        name: "question",
        matches: is_question,
        decision: RoutingDecision::WebSearch,
    },
    RoutingRule {
        name: "intent",
        matches: always,
        decision: RoutingDecision::IntentReply,
    },
];

/// 去掉首尾空白并转小写
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// 第一条命中的规则
pub fn decide(normalized: &str) -> RoutingDecision {
    ROUTING_RULES
        .iter()
        .find(|rule| (rule.matches)(normalized))
        .map(|rule| rule.decision)
        .unwrap_or(RoutingDecision::IntentReply)
}

/// 一次处理的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub response: String,
    pub decision: RoutingDecision,
    /// 本次写入的聊天记录 id
    pub record_id: u64,
}

pub struct ChatRouter {
    model: Arc<IntentModel>,
    catalog: ResponseCatalog,
    oracle: Arc<dyn SearchOracle>,
    history: Arc<dyn ChatHistoryRepository>,
    oracle_timeout: Duration,
    metrics: Arc<AppMetrics>,
}

impl ChatRouter {
    /// 目录必须覆盖模型的全部标签
    pub fn new(
        model: Arc<IntentModel>,
        catalog: ResponseCatalog,
        oracle: Arc<dyn SearchOracle>,
        history: Arc<dyn ChatHistoryRepository>,
    ) -> Result<Self> {
        let missing = catalog.missing(model.labels());
        if !missing.is_empty() {
            return Err(AppError::Config(format!(
                "Response catalog has no entry for labels: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            model,
            catalog,
            oracle,
            history,
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
            metrics: Arc::new(AppMetrics::default()),
        })
    }

    pub fn with_oracle_timeout(mut self, oracle_timeout: Duration) -> Self {
        self.oracle_timeout = oracle_timeout;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<AppMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    /// 处理一条输入并返回回复文本
    pub async fn resolve(&self, raw_input: &str) -> Result<String> {
        self.respond(raw_input).await.map(|resolution| resolution.response)
    }

    /// 与 `resolve` 相同，额外返回命中的策略和记录 id
    ///
    /// 搜索失败或超时会降级为“未找到”文本；聊天记录写入失败则整个请求失败。
    pub async fn respond(&self, raw_input: &str) -> Result<Resolution> {
        let input = normalize(raw_input);
        let decision = decide(&input);
        debug!(decision = %decision, "Routing message");

        let response = match decision {
            RoutingDecision::LinkLookup => self.link_reply(&input).await,
            RoutingDecision::WebSearch => self.search_reply(&input).await,
            RoutingDecision::IntentReply => self.intent_reply(&input),
        };
        self.metrics.record_chat(decision);

        let record = self
            .history
            .append(&input, &response)
            .await
            .inspect_err(|e| {
                self.metrics.record_storage_error();
                error!("Failed to save chat history: {}", e);
            })?;

        Ok(Resolution {
            response,
            decision,
            record_id: record.id,
        })
    }

    async fn link_reply(&self, query: &str) -> String {
        match self.ask_oracle("link", self.oracle.link(query)).await {
            Some(link) => link.to_anchor(),
            None => NO_LINK_MESSAGE.to_string(),
        }
    }

    async fn search_reply(&self, query: &str) -> String {
        self.ask_oracle("answer", self.oracle.answer(query))
            .await
            .unwrap_or_else(|| NO_ANSWER_MESSAGE.to_string())
    }

    fn intent_reply(&self, input: &str) -> String {
        let intent = self.model.classify(input);
        debug!(label = %intent, "Classified intent");
        self.catalog.lookup(intent.label_str()).to_string()
    }

    /// 超时与错误一律视为没有结果
    async fn ask_oracle<T>(
        &self,
        mode: &str,
        call: impl Future<Output = Result<Option<T>>>,
    ) -> Option<T> {
        match timeout(self.oracle_timeout, call).await {
            Ok(Ok(found)) => found,
            Ok(Err(e)) => {
                warn!(oracle_mode = mode, "Search oracle failed: {}", e);
                self.metrics.record_oracle_degraded();
                None
            }
            Err(_) => {
                warn!(
                    oracle_mode = mode,
                    "Search oracle timed out after {:?}",
                    self.oracle_timeout
                );
                self.metrics.record_oracle_degraded();
                None
            }
        }
    }
}
