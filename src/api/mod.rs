//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::observability::{ObservabilityState, create_observability_router, metrics_middleware};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    let metrics = app_state.metrics.clone();
    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics.clone(),
    ));

    let api = Router::new()
        .merge(routes::chat_routes::create_chat_router())
        .merge(routes::history_routes::create_history_router())
        .with_state(app_state);

    create_observability_router(observability_state)
        .merge(api)
        .layer(axum::middleware::from_fn_with_state(
            metrics,
            metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}
