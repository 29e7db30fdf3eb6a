mod apidoc;
mod config;
mod handlers;
mod models;
mod prompts;
mod routes;
mod services;

use std::sync::Arc;

use config::{Config, ConfigError};
use services::ChatCompletion;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub completion: Arc<dyn ChatCompletion>,
}

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // No credential, no listener
    let cfg = Config::from_env().inspect_err(|e| tracing::error!("{e}"))?;
    let addr = format!("{}:{}", cfg.app_host, cfg.app_port);

    let completion = services::build_completion(&cfg, reqwest::Client::new());
    tracing::info!(
        provider = cfg.provider.name(),
        model = %cfg.model,
        temperature = cfg.temperature,
        max_tokens = cfg.max_tokens,
        "completion client ready"
    );

    let state = AppState {
        cfg: Arc::new(cfg),
        completion,
    };
    let app = routes::app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Idea relay listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
