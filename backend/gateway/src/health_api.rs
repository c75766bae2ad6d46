//! `/api/health` — gateway liveness and remote collaborator reachability.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::server::GatewayState;

pub async fn health(State(state): State<Arc<GatewayState>>) -> Json<Value> {
    let (ocr_reachable, grammar_reachable) =
        tokio::join!(state.ocr.is_reachable(), state.grammar.is_reachable());

    Json(json!({
        "status": "ok",
        "service": "educheck-gateway",
        "ocr": {
            "endpoint": state.config.ocr.endpoint,
            "reachable": ocr_reachable,
        },
        "grammar": {
            "endpoint": state.config.grammar.endpoint,
            "reachable": grammar_reachable,
        },
        "routes": ["/api/ocr", "/api/grammar", "/api/health"],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use educheck_config::EduCheckConfig;

    #[tokio::test]
    async fn test_health_probes_unreachable_endpoints() {
        let mut config = EduCheckConfig::default();
        config.ocr.endpoint = "http://127.0.0.1:9/detect".into();
        config.grammar.endpoint = "http://127.0.0.1:9/check".into();
        let state = Arc::new(GatewayState::from_config(config));

        let Json(body) = health(State(state)).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["ocr"]["reachable"], false);
        assert_eq!(body["grammar"]["reachable"], false);
        assert!(body["grammar"]["endpoint"].as_str().unwrap().contains("/check"));
    }
}
