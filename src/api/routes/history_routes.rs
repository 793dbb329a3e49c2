//! History Routes
//!
//! 聊天记录浏览、最近记录与 CSV 导出。

use crate::api::handlers::history_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建历史记录路由器
pub fn create_history_router() -> Router<AppState> {
    Router::new()
        .route("/history", get(list_history))
        .route("/history/recent", get(recent_history))
        .route("/history/export.csv", get(export_csv))
}
