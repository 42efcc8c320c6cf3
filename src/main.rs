//! Tunesmith - local backend for the music automation dashboard
//!
//! Persists the dashboard's style/channel items and provider API keys to
//! disk and generates Suno-ready song-description prompts through Gemini.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod credentials;
mod generator;
mod providers;
mod routes;
mod store;

use config::Config;
use credentials::EnvFileCredentials;
use generator::PromptGenerator;
use providers::GeminiProvider;
use store::ConfigStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConfigStore>,
    pub generator: Arc<PromptGenerator>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunesmith=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let store = Arc::new(ConfigStore::new(&config.config_file, &config.env_file));
    let generator = Arc::new(PromptGenerator::new(
        GeminiProvider::new(&config.gemini_model),
        Arc::new(EnvFileCredentials::new(&config.env_file)),
    ));

    let state = AppState { store, generator };

    // The dashboard runs on a different origin, so CORS stays permissive.
    let app = Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("Tunesmith API running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
