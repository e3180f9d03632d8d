use axum::routing::get;
use axum::Router;
use tracing_subscriber::EnvFilter;

use verse_search::api;
use verse_search::config::Config;
use verse_search::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Corpus API: {}", config.corpus.base_url);
    tracing::info!("LLM provider: {} ({})", config.llm.provider, config.llm.base_url);

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        .route("/search", get(api::search::search))
        .route("/chapters", get(api::chapters::list_chapters))
        .route("/chapters/{id}/verses", get(api::chapters::chapter_verses))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
