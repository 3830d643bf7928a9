//! HTTP server for sensed

use crate::config::ServerConfig;
use crate::routes;
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::Router;
use sense_shared::{KeywordRules, TicketStore, STANDARD_RULES};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<dyn TicketStore>,
    pub rules: KeywordRules,
}

impl AppState {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self::with_rules(store, STANDARD_RULES)
    }

    pub fn with_rules(store: Arc<dyn TicketStore>, rules: KeywordRules) -> Self {
        Self { store, rules }
    }
}

/// CORS layer: any origin when none are configured, otherwise the listed ones
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("  Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full router
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::ticket_routes())
        .merge(routes::ai_routes())
        .with_state(state)
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until ctrl-c
pub async fn run(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = build_router(state, config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("  Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully");
}
