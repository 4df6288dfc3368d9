//! GET /context and POST /context.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::instrument;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::context::context_request::{ContextResponse, ContextUpdateRequest, MessageResponse},
};

/// Handler: GET /context
///
/// Never fails; an unset or unreachable store yields the fallback text.
#[instrument(name = "GET /context", skip_all)]
pub async fn get_context(State(state): State<Arc<AppState>>) -> Json<ContextResponse> {
    Json(ContextResponse {
        context: state.assistant.get_context().await,
    })
}

/// Handler: POST /context
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/context \
///   -H 'content-type: application/json' \
///   -d '{"new_context":"PTO policy: 20 days/year."}'
/// ```
#[instrument(name = "POST /context", skip_all)]
pub async fn set_context(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContextUpdateRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(body) = payload?;
    state.assistant.set_context(&body.new_context).await?;
    Ok(Json(MessageResponse::new("Context updated successfully")))
}
