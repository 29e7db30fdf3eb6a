use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde_json::Value as JsonValue;
use tracing::error;

use crate::{
    AppState, handlers,
    models::{
        common::ErrorMessage,
        prompt::{PromptRequest, PromptResponse},
    },
};

type RouteError = (StatusCode, Json<ErrorMessage>);

#[utoipa::path(
    post,
    path = "/prompt_llm",
    tag = "prompts",
    request_body = PromptRequest,
    responses(
        (status = 200, description = "Model output for the requested stage, or \"Unknown window_id\"", body = PromptResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorMessage),
        (status = 500, description = "Provider call failed", body = ErrorMessage)
    )
)]
pub async fn prompt_llm(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PromptResponse>, RouteError> {
    // Parsed whatever the Content-Type says; browsers send text/plain to skip preflight
    let payload: JsonValue = serde_json::from_slice(&body)
        .map_err(|err| bad_request(format!("Failed to parse prompt payload: {err}")))?;

    let JsonValue::Object(fields) = payload else {
        return Err(bad_request("Request body must be a JSON object".to_string()));
    };
    let request = PromptRequest::from(fields);

    let response = handlers::dispatch_prompt(&state, &request)
        .await
        .map_err(|e| {
            error!("handler error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorMessage::new("Internal Server Error")),
            )
        })?;

    Ok(Json(response))
}

fn bad_request(message: String) -> RouteError {
    (StatusCode::BAD_REQUEST, Json(ErrorMessage::new(message)))
}
