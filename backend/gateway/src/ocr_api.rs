//! `/api/ocr` — proxy route for the remote text-detection endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use educheck_core::{types::OCR_CONFIDENCE_REMOTE, EduCheckError};

use crate::server::GatewayState;

#[derive(Deserialize)]
pub struct OcrRequest {
    /// Base64-encoded image bytes.
    pub image_base64: Option<String>,
    /// Accepted as an alias for flexibility.
    pub image: Option<String>,
}

pub async fn detect(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<OcrRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(image_base64) = body.image_base64.or(body.image).filter(|s| !s.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Image data is required (image_base64 field)" })),
        );
    };

    info!(payload_len = image_base64.len(), "OCR proxy: processing image");

    match state.ocr.detect(&image_base64).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "text": outcome.text,
                "confidence": OCR_CONFIDENCE_REMOTE,
                "language": outcome.language.to_string(),
                "success": true,
            })),
        ),
        // Call succeeded but no text was found in the image.
        Err(EduCheckError::Validation(_)) => (
            StatusCode::OK,
            Json(json!({
                "error": "No text found in image",
                "text": "",
                "confidence": 0,
                "language": "unknown",
                "success": false,
            })),
        ),
        Err(EduCheckError::Timeout(secs)) => {
            warn!(timeout_secs = secs, "OCR proxy: request timed out");
            (
                StatusCode::REQUEST_TIMEOUT,
                Json(json!({ "error": "Request timeout", "success": false })),
            )
        }
        Err(EduCheckError::Transport { status, message }) if status != 0 => {
            warn!(status, "OCR proxy: upstream returned error");
            let code = match status {
                413 => StatusCode::PAYLOAD_TOO_LARGE,
                429 => StatusCode::TOO_MANY_REQUESTS,
                s if s >= 500 => StatusCode::INTERNAL_SERVER_ERROR,
                s => StatusCode::from_u16(s).unwrap_or(StatusCode::BAD_GATEWAY),
            };
            (code, Json(json!({ "error": message, "success": false })))
        }
        Err(e) => {
            warn!(error = %e, "OCR proxy: request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error", "success": false })),
            )
        }
    }
}

pub async fn info() -> Json<Value> {
    Json(json!({
        "status": "OCR API is running",
        "endpoint": "/api/ocr",
        "method": "POST",
        "required": ["image_base64"],
        "format": "Base64 encoded image string",
        "maxSize": "5MB",
        "supportedFormats": ["JPG", "PNG", "GIF", "WebP"],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use educheck_config::EduCheckConfig;

    fn offline_state() -> Arc<GatewayState> {
        let mut config = EduCheckConfig::default();
        config.ocr.endpoint = "http://127.0.0.1:9/detect".into();
        config.ocr.timeout_secs = 2;
        config.grammar.endpoint = "http://127.0.0.1:9/check".into();
        config.grammar.timeout_secs = 2;
        Arc::new(GatewayState::from_config(config))
    }

    #[tokio::test]
    async fn test_missing_image_is_bad_request() {
        let (status, Json(body)) = detect(
            State(offline_state()),
            Json(OcrRequest {
                image_base64: None,
                image: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("image_base64"));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_server_error() {
        let (status, Json(body)) = detect(
            State(offline_state()),
            Json(OcrRequest {
                image_base64: Some("aGVsbG8=".into()),
                image: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }
}
