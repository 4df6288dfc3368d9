//! GET /history: latest logged question/answer pairs.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::instrument;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::history::history_request::{DEFAULT_LIMIT, HistoryQuery, HistoryResponse},
};

/// Handler: GET /history?limit=N
#[instrument(name = "GET /history", skip_all)]
pub async fn history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> AppResult<Json<HistoryResponse>> {
    let Query(q) = query?;
    let entries = state
        .assistant
        .history(q.limit.unwrap_or(DEFAULT_LIMIT))
        .await?;
    Ok(Json(HistoryResponse {
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}
