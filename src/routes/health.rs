use axum::Json;

use crate::models::common::StatusMessage;

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = StatusMessage)
    )
)]
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Backend is running.".to_string(),
    })
}
