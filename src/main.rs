use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use vocabulary_ai::config::Config;
use vocabulary_ai::lookup::WordLookupService;
use vocabulary_ai::provider::GeminiClient;
use vocabulary_ai::server::{self, AppState};
use vocabulary_ai::{TtlCache, WordDetails};

#[derive(Parser)]
#[command(name = "vocabulary-server", about = "Vocabulary AI lookup service")]
struct Cli {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// HTTP port
    #[arg(long, default_value = "3000")]
    port: u16,
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "startup failed");
            std::process::exit(1);
        }
    };

    let gemini = Arc::new(GeminiClient::new(config.gemini.clone()).expect("HTTP client"));

    let cache: TtlCache<WordDetails> = TtlCache::with_default_ttl(config.cache_ttl);
    let sweeper = cache.spawn_sweeper(config.sweep_interval);

    let state = Arc::new(AppState {
        lookup: WordLookupService::new(cache, gemini.clone(), config.retry, config.cache_ttl),
        gemini: gemini.clone(),
    });

    let app = Router::new()
        .merge(server::routes())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    tracing::info!(model = gemini.model(), "vocabulary server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.expect("bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");

    // Stop the sweep task explicitly rather than leaking it past shutdown.
    sweeper.stop();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
