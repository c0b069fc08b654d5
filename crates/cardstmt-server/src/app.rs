//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use cardstmt_core::{ServerConfig, StatementConfig, StatementProcessor};

use crate::handlers;
use crate::state::AppState;

/// Headroom above the largest accepted document for multipart framing.
const BODY_LIMIT_HEADROOM: usize = 1024 * 1024;

/// Build the CORS layer. An empty origin list allows any origin.
fn create_cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    info!("CORS allowed origins: {}", config.allowed_origins.join(", "));

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|s| match s.trim().parse() {
            Ok(origin) => Some(origin),
            Err(e) => {
                warn!("Invalid CORS origin {}: {}", s, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application router from configuration.
pub fn router(config: &StatementConfig) -> Router {
    let state = Arc::new(AppState {
        processor: StatementProcessor::new(config),
        max_file_size: config.pdf.max_file_size,
    });

    Router::new()
        .route("/", get(handlers::index::index))
        .route("/supported-banks", get(handlers::index::supported_banks))
        .route("/parse", post(handlers::parse::parse))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(
            config.pdf.max_file_size + BODY_LIMIT_HEADROOM,
        ))
        .layer(create_cors_layer(&config.server))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
