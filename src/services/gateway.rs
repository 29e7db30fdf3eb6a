use std::borrow::Cow;

use async_trait::async_trait;
use url::Url;

use super::completion::{ChatCompletion, Completion, CompletionError, CompletionRequest, execute};
use crate::models::chat::ChatCompletionBody;

const SUBSCRIPTION_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Client for the Aalto Azure OpenAI gateway. The gateway serves one route
/// per deployment, so the model identifier selects the URL path and is not
/// sent in the body.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    subscription_key: String,
}

impl GatewayClient {
    pub fn new(http: reqwest::Client, base_url: Url, subscription_key: String) -> Self {
        Self {
            http,
            base_url,
            subscription_key,
        }
    }

    fn endpoint(&self, model: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(&deployment_path(model))
    }
}

/// Gateway route serving chat completions for `model`.
///
/// A handful of model aliases are served from shared routes; every other
/// identifier is addressed as a named deployment. An identifier that is
/// already a path is used as is.
pub fn deployment_path(model: &str) -> Cow<'_, str> {
    match model {
        "chatgpt-4o-latest" | "gpt-4o" | "gpt-4o-2024-05-13" => {
            Cow::Borrowed("/v1/openai/gpt4o/chat/completions")
        }
        "gpt-4-turbo" | "gpt-4-turbo-2024-04-09" => {
            Cow::Borrowed("/v1/openai/gpt4-turbo/chat/completions")
        }
        path if path.starts_with('/') => Cow::Borrowed(path),
        deployment => Cow::Owned(format!(
            "/v1/openai/deployments/{deployment}/chat/completions"
        )),
    }
}

#[async_trait]
impl ChatCompletion for GatewayClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        let body = ChatCompletionBody {
            model: None,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };
        let req = self
            .http
            .post(self.endpoint(&request.model)?)
            .header(SUBSCRIPTION_HEADER, &self.subscription_key)
            .json(&body);

        execute("aalto", &request, req).await
    }
}
