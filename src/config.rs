use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use thiserror::Error;
use url::Url;

pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";
pub const DEFAULT_TEMPERATURE: f64 = 0.8;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
const AALTO_BASE_URL: &str = "https://aalto-openai-apigw.azure-api.net";

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind host (e.g., 0.0.0.0)
    pub app_host: String,
    /// HTTP bind port (e.g., 8000)
    pub app_port: u16,

    /// Which chat-completion provider to call, with its credential
    pub provider: ProviderConfig,

    /// Model identifier; the gateway derives its request path from it
    pub model: String,
    pub temperature: f64,
    /// Output token budget; defaults depend on the provider
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub enum ProviderConfig {
    /// OpenAI API, bearer-authenticated
    OpenAi { base_url: Url, api_key: String },
    /// Aalto Azure OpenAI gateway, subscription-key authenticated
    Gateway {
        base_url: Url,
        subscription_key: String,
    },
}

impl ProviderConfig {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderConfig::OpenAi { .. } => "openai",
            ProviderConfig::Gateway { .. } => "aalto",
        }
    }

    fn default_max_tokens(&self) -> u32 {
        match self {
            ProviderConfig::OpenAi { .. } => 35,
            ProviderConfig::Gateway { .. } => 40,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid URL for {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("Invalid number for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("General error: {0}")]
    Other(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present
        let _ = dotenv();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_host = env_or_default(&lookup, "APP_HOST", "0.0.0.0");
        let app_port = parse_or_default::<u16, _>(&lookup, "APP_PORT", 8000)?;

        let provider = provider_from_source(&lookup)?;

        let model = env_or_default(&lookup, "LLM_MODEL", DEFAULT_MODEL);
        let temperature = parse_or_default(&lookup, "LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        let max_tokens = parse_or_default(&lookup, "LLM_MAX_TOKENS", provider.default_max_tokens())?;

        Ok(Self {
            app_host,
            app_port,
            provider,
            model,
            temperature,
            max_tokens,
        })
    }
}

/* --------------------------- helpers --------------------------- */

fn provider_from_source<F>(lookup: &F) -> Result<ProviderConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let selected = match non_empty(lookup, "LLM_PROVIDER") {
        Some(name) => name.to_lowercase(),
        None if non_empty(lookup, "OPENAI_API_KEY").is_some() => "openai".to_string(),
        None if non_empty(lookup, "AALTO_OPENAI_API_KEY").is_some() => "aalto".to_string(),
        // Neither credential is set; report the direct provider's key
        None => return Err(ConfigError::MissingVar("OPENAI_API_KEY")),
    };

    match selected.as_str() {
        "openai" => Ok(ProviderConfig::OpenAi {
            base_url: parse_url_or_default(lookup, "OPENAI_BASE_URL", OPENAI_BASE_URL)?,
            api_key: required(lookup, "OPENAI_API_KEY")?,
        }),
        "aalto" | "gateway" => Ok(ProviderConfig::Gateway {
            base_url: parse_url_or_default(lookup, "AALTO_OPENAI_BASE_URL", AALTO_BASE_URL)?,
            subscription_key: required(lookup, "AALTO_OPENAI_API_KEY")?,
        }),
        other => Err(ConfigError::Other(format!(
            "Unknown LLM_PROVIDER: {other} (expected 'openai' or 'aalto')"
        ))),
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).ok_or(ConfigError::MissingVar(key))
}

fn env_or_default<F>(lookup: &F, key: &'static str, default: &'static str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn parse_or_default<T: FromStr, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => v.parse::<T>().map_err(|_| ConfigError::InvalidNumber {
            name: key,
            value: v,
        }),
        None => Ok(default),
    }
}

fn parse_url_or_default<F>(
    lookup: &F,
    key: &'static str,
    default: &'static str,
) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = env_or_default(lookup, key, default);
    Url::parse(&raw).map_err(|_| ConfigError::InvalidUrl {
        name: key,
        value: raw,
    })
}
