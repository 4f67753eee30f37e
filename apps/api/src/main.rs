mod config;
mod dispatch;
mod drafting;
mod errors;
mod followup;
mod llm_client;
mod routes;
mod state;
mod summary;
mod transcript;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dispatch::mailslurp::MailSlurpClient;
use crate::followup::session::SessionStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast if either API key is missing
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting follow-up service v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.groq_api_key.clone(),
        config.groq_api_base.clone(),
        config.llm_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    let mailer = MailSlurpClient::new(
        config.mailslurp_api_key.clone(),
        config.mailslurp_api_base.clone(),
    );
    info!("Email client initialized ({})", config.mailslurp_api_base);

    let state = AppState {
        llm: Arc::new(llm),
        mailer: Arc::new(mailer),
        sessions: SessionStore::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
