use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::history_dto::*},
    error::AppError,
    models::chat_record::{ChatRecord, HistoryQuery},
};

pub async fn list_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = state.config.history.page_limit;
    debug!("Listing chat history (keyword: {:?})", params.q);

    let query = HistoryQuery {
        keyword: params.q,
        limit: Some(limit),
    };
    let records = state.history.query(&query).await?;

    let responses: Vec<ChatRecordResponse> = records.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

pub async fn recent_history(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records = state
        .history
        .recent(state.config.history.recent_limit)
        .await?;

    let responses: Vec<RecentChatResponse> = records.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records = state.history.query(&HistoryQuery::all()).await?;
    debug!("Exporting {} chat records as CSV", records.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment;filename=chat_history.csv",
            ),
        ],
        render_csv(&records),
    ))
}

/// 每个字段都加双引号，字段内的双引号写两次
pub fn render_csv(records: &[ChatRecord]) -> String {
    let mut out = String::from("User Message,Bot Response,Timestamp\n");
    for record in records {
        let timestamp = record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(&record.user_message),
            csv_field(&record.bot_response),
            csv_field(&timestamp)
        ));
    }
    out
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
