use async_trait::async_trait;
use url::Url;

use super::completion::{ChatCompletion, Completion, CompletionError, CompletionRequest, execute};
use crate::models::chat::ChatCompletionBody;

/// Direct OpenAI client; the model is chosen by the body's `model` field.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, base_url: Url, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    fn endpoint(&self) -> Result<Url, url::ParseError> {
        // Url::join drops the last segment unless the base ends with '/'
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("chat/completions")
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        let body = ChatCompletionBody {
            model: Some(request.model.as_str()),
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };
        let req = self
            .http
            .post(self.endpoint()?)
            .bearer_auth(&self.api_key)
            .json(&body);

        execute("openai", &request, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatMessage;
    use crate::services::testing::{FakeProvider, completion_body};
    use axum::http::StatusCode;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-2024-08-06".to_string(),
            messages: vec![ChatMessage::developer("sys"), ChatMessage::user("hi")],
            temperature: 0.8,
            max_tokens: Some(35),
        }
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let http = reqwest::Client::new();
        let with_slash = OpenAiClient::new(
            http.clone(),
            Url::parse("https://api.openai.com/v1/").unwrap(),
            "k".into(),
        );
        let without_slash = OpenAiClient::new(
            http,
            Url::parse("https://api.openai.com/v1").unwrap(),
            "k".into(),
        );
        assert_eq!(
            with_slash.endpoint().unwrap().as_str(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            without_slash.endpoint().unwrap().as_str(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn sends_model_in_body_with_bearer_auth() {
        let fake = FakeProvider::start(StatusCode::OK, completion_body("What if bread flew?")).await;
        let base = fake.base_url.join("v1/").unwrap();
        let client = OpenAiClient::new(reqwest::Client::new(), base, "sk-test".to_string());

        let completion = client.complete(request()).await.unwrap();
        assert_eq!(completion.output, "What if bread flew?");
        assert_eq!(completion.input, "sys\n\nhi");

        let seen = fake.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "/v1/chat/completions");
        assert_eq!(
            seen[0].headers.get("authorization").unwrap(),
            "Bearer sk-test"
        );
        assert_eq!(
            seen[0].body,
            json!({
                "model": "gpt-4o-2024-08-06",
                "messages": [
                    {"role": "developer", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ],
                "temperature": 0.8,
                "max_tokens": 35
            })
        );
    }

    #[tokio::test]
    async fn provider_errors_surface_with_status() {
        let fake = FakeProvider::start(
            StatusCode::UNAUTHORIZED,
            json!({"error": {"message": "bad key"}}),
        )
        .await;
        let client = OpenAiClient::new(reqwest::Client::new(), fake.base_url.clone(), "x".into());

        let err = client.complete(request()).await.unwrap_err();
        match err {
            CompletionError::Status { status, body } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert!(body.contains("bad key"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn null_content_yields_empty_output() {
        let fake = FakeProvider::start(
            StatusCode::OK,
            json!({
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": null}, "finish_reason": "content_filter"}
                ]
            }),
        )
        .await;
        let client = OpenAiClient::new(reqwest::Client::new(), fake.base_url.clone(), "x".into());

        let completion = client.complete(request()).await.unwrap();
        assert_eq!(completion.output, "");
        assert_eq!(completion.input, "sys\n\nhi");
        assert!(completion.raw.choices[0].message.content.is_none());
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let fake = FakeProvider::start(StatusCode::OK, json!({"choices": []})).await;
        let client = OpenAiClient::new(reqwest::Client::new(), fake.base_url.clone(), "x".into());

        let err = client.complete(request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyChoices));
    }
}
