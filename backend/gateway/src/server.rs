//! Main HTTP gateway server and shared route state.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use educheck_config::EduCheckConfig;
use educheck_grammar::TahrirchiClient;
use educheck_ocr::VisionOcrClient;

use crate::{grammar_api, health_api, ocr_api};

/// Application state shared across routes.
pub struct GatewayState {
    pub ocr: VisionOcrClient,
    pub grammar: TahrirchiClient,
    pub config: EduCheckConfig,
}

impl GatewayState {
    pub fn from_config(config: EduCheckConfig) -> Self {
        let ocr = VisionOcrClient::new(&config.ocr.endpoint)
            .with_timeout(Duration::from_secs(config.ocr.timeout_secs));
        let mut grammar = TahrirchiClient::new(&config.grammar.endpoint)
            .with_timeout(Duration::from_secs(config.grammar.timeout_secs));
        if let Some(token) = &config.grammar.auth_token {
            grammar = grammar.with_auth_token(token);
        }
        Self {
            ocr,
            grammar,
            config,
        }
    }
}

/// Build the gateway router.
pub fn build_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/api/health", get(health_api::health))
        .route("/api/ocr", get(ocr_api::info).post(ocr_api::detect))
        .route(
            "/api/grammar",
            get(grammar_api::info).post(grammar_api::check),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start_server(addr: SocketAddr, state: Arc<GatewayState>) -> Result<()> {
    let app = build_router(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
