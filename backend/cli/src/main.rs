mod terminal_output;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use educheck_config::{load_and_prepare, EduCheckConfig};
use educheck_gateway::{start_server, GatewayState};
use educheck_grammar::TahrirchiClient;
use educheck_logging::init_logger;
use educheck_ocr::VisionOcrClient;
use educheck_pipeline::{AnalysisInput, AnalysisPipeline, ResultStore};

#[derive(Parser)]
#[command(name = "educheck")]
#[command(about = "EduCheck — handwritten essay analysis")]
#[command(version)]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, global = true, default_value = "educheck.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the EduCheck HTTP gateway
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run the full pipeline on an essay image
    Analyze {
        /// Path to the image file
        image: PathBuf,
        /// Emit the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Grammar-check raw text (skips OCR)
    Check {
        /// Text to check; omit to read from --file
        text: Option<String>,
        /// Read the text from a file instead
        #[arg(long)]
        file: Option<PathBuf>,
        /// Emit the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Query a running gateway's health endpoint
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_and_prepare(&cli.config).await?;

    init_logger(
        config.logging.dir.as_deref().map(Path::new),
        &config.logging.level,
    );

    match cli.command {
        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.gateway.port = port;
            }
            run_server(config).await?;
        }
        Commands::Analyze { image, json } => {
            let bytes = std::fs::read(&image)
                .with_context(|| format!("Failed to read image {}", image.display()))?;
            run_analysis(config, AnalysisInput::Image(bytes), json).await?;
        }
        Commands::Check { text, file, json } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => return Err(anyhow!("Provide TEXT or --file PATH")),
            };
            run_analysis(config, AnalysisInput::Text(text), json).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!(
                    "http://localhost:{}/api/health",
                    config.gateway.port
                ))
                .timeout(Duration::from_secs(5))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!(
                        "EduCheck gateway is not running on port {}",
                        config.gateway.port
                    );
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: EduCheckConfig) -> Result<()> {
    info!(
        port = config.gateway.port,
        bind = %config.gateway.bind_address,
        "Starting EduCheck gateway"
    );
    info!(config = ?config.redacted(), "Effective configuration");

    let addr: SocketAddr = format!("{}:{}", config.gateway.bind_address, config.gateway.port)
        .parse()
        .context("Invalid gateway bind address")?;
    let state = Arc::new(GatewayState::from_config(config));
    start_server(addr, state).await
}

async fn run_analysis(config: EduCheckConfig, input: AnalysisInput, json: bool) -> Result<()> {
    let recognizer = VisionOcrClient::new(&config.ocr.endpoint)
        .with_timeout(Duration::from_secs(config.ocr.timeout_secs));
    let mut checker = TahrirchiClient::new(&config.grammar.endpoint)
        .with_timeout(Duration::from_secs(config.grammar.timeout_secs));
    if let Some(token) = &config.grammar.auth_token {
        checker = checker.with_auth_token(token);
    }

    let store = ResultStore::new();
    let mut pipeline = AnalysisPipeline::new(recognizer, checker, store.clone())
        .with_prepare_delay(Duration::ZERO);

    let result = pipeline.run(input).await?;
    let extracted = store
        .extracted()
        .await
        .ok_or_else(|| anyhow!("Pipeline finished without extracted text"))?;

    if json {
        let payload = serde_json::json!({
            "text": extracted.text,
            "result": result,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        terminal_output::print_result(&extracted.text, &result);
    }

    Ok(())
}
