use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod routes;
mod upstream;

use upstream::{UpstreamClient, UpstreamConfig};

const DEFAULT_ADDR: &str = "0.0.0.0:3001";

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/render", post(routes::render))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "render_server=info,tower_http=info".into()),
        )
        .init();

    let config = UpstreamConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("RENDER_API_KEY not set, upstream calls will be unauthenticated");
    }
    tracing::info!("Upstream: {} (model {})", config.url, config.model);

    let state = AppState {
        upstream: Arc::new(UpstreamClient::new(config)),
    };

    let addr = std::env::var("RENDER_SERVER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Cannot bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Render relay listening on http://{}", addr);
    if let Err(e) = axum::serve(listener, router(state)).await {
        tracing::error!("Server error: {}", e);
    }
}
