//! `/api/grammar` — proxy route for the remote grammar endpoint, with the
//! mock generator as a server-side second line of defense.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use educheck_grammar::generate_mock_errors;
use educheck_logging::redact_sensitive_data;

use crate::server::GatewayState;

#[derive(Deserialize)]
pub struct GrammarRequest {
    pub text: Option<String>,
    #[allow(dead_code)]
    pub language: Option<String>,
}

pub async fn check(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<GrammarRequest>,
) -> (StatusCode, Json<Value>) {
    let text = body.text.unwrap_or_default();
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Text is required" })),
        );
    }

    if trimmed.chars().count() < 2 {
        let prompt = "Iltimos, to'liq matn kiriting";
        return (
            StatusCode::OK,
            Json(json!({
                "errors": [{
                    "position": 0,
                    "length": trimmed.len(),
                    "text": trimmed,
                    "corrections": [prompt],
                    "correction": prompt,
                    "type": "style",
                    "description": "Matn juda qisqa",
                    "sentence_start": 0,
                    "sentence_end": trimmed.len(),
                }],
                "success": true,
                "source": "validation",
                "fallback": false,
            })),
        );
    }

    info!(chars = text.len(), "Grammar proxy: processing text");

    match state.grammar.check_remote(&text).await {
        Ok(errors) => (
            StatusCode::OK,
            Json(json!({
                "errors": errors,
                "success": true,
                "source": "tahrirchi.uz",
                "fallback": false,
            })),
        ),
        Err(e) => {
            // The error string can carry the upstream URL; scrub credentials
            // before it reaches logs or the response body.
            let api_error = redact_sensitive_data(&e.to_string());
            warn!(error = %api_error, "Grammar proxy: upstream failed, using mock errors");
            let errors = generate_mock_errors(&text);
            (
                StatusCode::OK,
                Json(json!({
                    "errors": errors,
                    "success": true,
                    "source": "mock",
                    "fallback": true,
                    "api_error": api_error,
                })),
            )
        }
    }
}

pub async fn info() -> Json<Value> {
    Json(json!({
        "status": "Grammar API is running",
        "endpoint": "/api/grammar",
        "method": "POST",
        "required": ["text"],
        "optional": ["language"],
        "mock_fallback": "Active when API unavailable",
    }))
}
