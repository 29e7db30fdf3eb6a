use std::sync::Arc;

use crate::config::{Config, ProviderConfig};

pub mod completion;
pub mod gateway;
pub mod openai;

pub use completion::{ChatCompletion, CompletionError, CompletionRequest};
pub use gateway::GatewayClient;
pub use openai::OpenAiClient;

/// Picks the completion backend named by the configuration.
pub fn build_completion(cfg: &Config, http: reqwest::Client) -> Arc<dyn ChatCompletion> {
    match &cfg.provider {
        ProviderConfig::OpenAi { base_url, api_key } => {
            Arc::new(OpenAiClient::new(http, base_url.clone(), api_key.clone()))
        }
        ProviderConfig::Gateway {
            base_url,
            subscription_key,
        } => Arc::new(GatewayClient::new(
            http,
            base_url.clone(),
            subscription_key.clone(),
        )),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_config_selects_client() {
        let cfg = Config::from_source(|key| match key {
            "AALTO_OPENAI_API_KEY" => Some("sub".to_string()),
            _ => None,
        })
        .unwrap();
        // Only checks that construction succeeds for the gateway branch
        let _client = build_completion(&cfg, reqwest::Client::new());
        assert_eq!(cfg.provider.name(), "aalto");
    }
}
