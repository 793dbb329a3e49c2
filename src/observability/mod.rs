//! 可观测性模块
//!
//! 提供 Prometheus 文本格式指标、结构化日志和健康检查。

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

use crate::config::config::LoggingConfig;
use crate::error::{AppError, Result};
use crate::router::RoutingDecision;

// ===== Simple Metrics =====

/// 简单应用指标
#[derive(Debug, Default)]
pub struct AppMetrics {
    pub http_requests_total: AtomicU64,
    pub chats_total: AtomicU64,
    pub link_lookups_total: AtomicU64,
    pub web_searches_total: AtomicU64,
    pub intent_replies_total: AtomicU64,
    pub oracle_degraded_total: AtomicU64,
    pub storage_errors_total: AtomicU64,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次路由结果
    pub fn record_chat(&self, decision: RoutingDecision) {
        self.chats_total.fetch_add(1, Ordering::Relaxed);
        let counter = match decision {
            RoutingDecision::LinkLookup => &self.link_lookups_total,
            RoutingDecision::WebSearch => &self.web_searches_total,
            RoutingDecision::IntentReply => &self.intent_replies_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// 搜索失败或超时后降级
    pub fn record_oracle_degraded(&self) {
        self.oracle_degraded_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_storage_error(&self) {
        self.storage_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP chats_total Total routed chat messages
# TYPE chats_total counter
chats_total {}
# HELP routing_decisions_total Routed chat messages by strategy
# TYPE routing_decisions_total counter
routing_decisions_total{{decision="link_lookup"}} {}
routing_decisions_total{{decision="web_search"}} {}
routing_decisions_total{{decision="intent_reply"}} {}
# HELP oracle_degraded_total Search calls that failed or timed out
# TYPE oracle_degraded_total counter
oracle_degraded_total {}
# HELP storage_errors_total Failed chat history writes
# TYPE storage_errors_total counter
storage_errors_total {}
"#,
            self.http_requests_total.load(Ordering::Relaxed),
            self.chats_total.load(Ordering::Relaxed),
            self.link_lookups_total.load(Ordering::Relaxed),
            self.web_searches_total.load(Ordering::Relaxed),
            self.intent_replies_total.load(Ordering::Relaxed),
            self.oracle_degraded_total.load(Ordering::Relaxed),
            self.storage_errors_total.load(Ordering::Relaxed),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
}

#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: Arc<AppMetrics>) -> Self {
        Self {
            metrics,
            start_time: Utc::now(),
            version,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

/// 获取健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (axum::http::StatusCode::OK, state.metrics.gather())
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/metrics", get(metrics))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化日志
///
/// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 需要在进程退出前保持存活。
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AppError::Config(format!("Invalid log level {}: {}", config.level, e)))?;

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "parlance.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    let installed = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| AppError::Internal(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(guard)
}

// ===== Request Metrics Middleware =====

/// 记录请求计数的中间件
pub async fn metrics_middleware(
    State(metrics): State<Arc<AppMetrics>>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    metrics.record_http_request();
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_gather() {
        let metrics = AppMetrics::default();
        metrics.record_http_request();
        metrics.record_chat(RoutingDecision::WebSearch);
        metrics.record_chat(RoutingDecision::IntentReply);
        metrics.record_chat(RoutingDecision::IntentReply);
        metrics.record_oracle_degraded();

        let output = metrics.gather();
        assert!(output.contains("http_requests_total 1"));
        assert!(output.contains("chats_total 3"));
        assert!(output.contains(r#"routing_decisions_total{decision="intent_reply"} 2"#));
        assert!(output.contains(r#"routing_decisions_total{decision="link_lookup"} 0"#));
        assert!(output.contains("oracle_degraded_total 1"));
        assert!(output.contains("storage_errors_total 0"));
    }

    #[test]
    fn test_uptime_is_non_negative() {
        let state = ObservabilityState::new("0.1.0".to_string(), Arc::new(AppMetrics::default()));
        assert!(state.uptime_seconds() >= 0.0);
    }
}
