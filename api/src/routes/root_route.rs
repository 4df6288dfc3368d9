use axum::Json;

use crate::routes::context::context_request::MessageResponse;

/// Handler: GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Onboarding Assistant API is running!"))
}
