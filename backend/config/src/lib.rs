//! `educheck-config` — EduCheck runtime configuration.
//!
//! Provides:
//! - Typed config schema (remote endpoints, timeouts, gateway, logging)
//! - YAML loading with sensible defaults when the file is absent
//! - `${ENV_VAR}` substitution
//! - Environment-variable overrides for the CLI
//! - Token redaction for safe logging/display

pub mod env;
pub mod io;
pub mod schema;

pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::load_config;
pub use schema::{EduCheckConfig, GatewayConfig, GrammarConfig, LoggingConfig, OcrConfig};

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Load a config file, apply `${VAR}` substitution, and layer environment
/// overrides on top. Main entry point for the CLI and the gateway.
pub async fn load_and_prepare(path: &Path) -> Result<EduCheckConfig> {
    let raw = load_config(path).await?;

    let value: Value =
        serde_json::to_value(&raw).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;
    let config: EduCheckConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    Ok(config.with_env_overrides())
}
