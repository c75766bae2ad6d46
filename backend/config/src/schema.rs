//! EduCheck configuration schema, typed for serde YAML/JSON deserialization.

use serde::{Deserialize, Serialize};

/// Root configuration for the EduCheck backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EduCheckConfig {
    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub grammar: GrammarConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote text-detection endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    #[serde(default = "default_ocr_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_ocr_timeout")]
    pub timeout_secs: u64,
}

/// Remote grammar-check endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarConfig {
    #[serde(default = "default_grammar_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_grammar_timeout")]
    pub timeout_secs: u64,
    /// Bearer token for the grammar endpoint, if one is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

/// Gateway HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for the rolling NDJSON file log; console-only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

fn default_ocr_endpoint() -> String {
    "https://educhecktexttest1111.onrender.com/detect".to_string()
}

fn default_ocr_timeout() -> u64 {
    30
}

fn default_grammar_endpoint() -> String {
    "https://websocket.tahrirchi.uz/check".to_string()
}

fn default_grammar_timeout() -> u64 {
    25
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: default_ocr_endpoint(),
            timeout_secs: default_ocr_timeout(),
        }
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            endpoint: default_grammar_endpoint(),
            timeout_secs: default_grammar_timeout(),
            auth_token: None,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

impl EduCheckConfig {
    /// Layer environment-variable overrides on top of the loaded values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("EDUCHECK_OCR_ENDPOINT") {
            self.ocr.endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var("EDUCHECK_GRAMMAR_ENDPOINT") {
            self.grammar.endpoint = endpoint;
        }
        if let Ok(token) = std::env::var("EDUCHECK_GRAMMAR_TOKEN") {
            self.grammar.auth_token = Some(token);
        }
        if let Ok(bind) = std::env::var("EDUCHECK_BIND") {
            self.gateway.bind_address = bind;
        }
        if let Some(port) = std::env::var("EDUCHECK_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            self.gateway.port = port;
        }
        if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
        self
    }

    /// Copy safe to log or print: the auth token is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.grammar.auth_token.is_some() {
            copy.grammar.auth_token = Some("***".to_string());
        }
        copy
    }
}
