use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use thiserror::Error;
use tracing::info;

use crate::models::chat::{ChatCompletionResponse, ChatMessage};

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Completion {
    /// All message contents joined by a blank line, as sent
    pub input: String,
    /// Text of the first choice
    pub output: String,
    pub raw: ChatCompletionResponse,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("json error: {0}")]
    Decode(String),
    #[error("provider returned no choices")]
    EmptyChoices,
    #[error("invalid provider url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Sends one chat completion and returns the text of the first choice.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError>;
}

pub fn joined_input(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Sends a prepared provider request and extracts the first choice.
pub(crate) async fn execute(
    provider: &'static str,
    request: &CompletionRequest,
    req: RequestBuilder,
) -> Result<Completion, CompletionError> {
    let started = std::time::Instant::now();
    let res = req.send().await?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res
            .text()
            .await
            .unwrap_or_else(|_| "<body unavailable>".to_string());
        return Err(CompletionError::Status { status, body });
    }

    let bytes = res.bytes().await?;
    let raw: ChatCompletionResponse =
        serde_json::from_slice(&bytes).map_err(|e| CompletionError::Decode(e.to_string()))?;

    let output = raw
        .choices
        .first()
        .ok_or(CompletionError::EmptyChoices)?
        .message
        .content
        .clone()
        .unwrap_or_default();

    info!(
        provider,
        model = %request.model,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "chat completion finished"
    );

    Ok(Completion {
        input: joined_input(&request.messages),
        output,
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_joined_with_blank_lines() {
        let messages = vec![ChatMessage::developer("a"), ChatMessage::user("b\nc")];
        assert_eq!(joined_input(&messages), "a\n\nb\nc");
    }
}
