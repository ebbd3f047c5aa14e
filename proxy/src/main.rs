mod analysis;
mod analyzer;
mod config;
mod middleware;
mod news;
mod routes;
mod sweeper;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::analysis::MarketAnalyst;
use crate::config::ProxyConfig;
use crate::middleware::rate_limit::RateLimiter;
use crate::news::cache::NewsCache;
use crate::news::source::GNewsClient;
use crate::news::NewsDesk;

/// Shared application state passed to all route handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub analyst: MarketAnalyst,
    pub news: NewsDesk,
}

fn router(state: AppState) -> Router {
    // CORS layer: browser clients call from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/analyze-market", post(routes::analyze::analyze_market))
        .route("/fetch-news", post(routes::news::fetch_news))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignored in production where env vars are set externally)
    let _ = dotenvy::dotenv();

    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ProxyConfig::from_env()?;
    info!(
        "Configuration loaded (port={}, provider={})",
        config.port, config.llm_provider
    );

    let model = analyzer::build_model(&config)?;
    if model.is_none() {
        warn!(
            "No API key for {}; every analysis will use fallback data",
            config.llm_provider
        );
    }
    let analyst = MarketAnalyst::new(model, config.llm_repair_pass);

    let gnews = GNewsClient::new(
        &config.news_api_key,
        &config.news_api_base,
        config.news_max_articles,
        &config.news_language,
        config.upstream_timeout_secs,
    )?;
    if !gnews.is_configured() {
        warn!("NEWS_API_KEY not set; news requests will get placeholder articles");
    }
    let cache = NewsCache::new(config.news_cache_ttl_secs);
    let rate_limiter = RateLimiter::new(
        config.news_rate_limit_max,
        config.news_rate_limit_window_secs,
    );

    let state = AppState {
        analyst,
        news: NewsDesk::new(Arc::new(gnews), cache.clone(), rate_limiter.clone()),
    };

    let app = router(state);

    // Spawn background eviction of expired cache and rate-limit state
    let sweep_interval = config.sweep_interval_secs;
    tokio::spawn(async move {
        sweeper::run_sweeper(cache, rate_limiter, sweep_interval).await;
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Market Lens proxy v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);
    info!("Routes:");
    info!("  GET  /api/health");
    info!("  POST /analyze-market");
    info!("  POST /fetch-news");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
pub(crate) fn test_state(analyst: MarketAnalyst) -> AppState {
    use crate::news::testing::FakeNewsSource;

    AppState {
        analyst,
        news: NewsDesk::new(
            Arc::new(FakeNewsSource::returning(&["Quarterly results beat expectations"])),
            NewsCache::new(1800),
            RateLimiter::new(100, 3600),
        ),
    }
}
