//! Health check endpoint

use axum::Json;

use super::MessageResponse;

/// Service welcome / liveness endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse)
    )
)]
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Welcome to the book database!"))
}
