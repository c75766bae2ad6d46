use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use educheck_core::{EduCheckError, ExtractedText, Language, TextRecognizer};

use crate::fallback::fallback_sample;
use crate::language::detect_language;

/// Client-side wait bound for a single detection call.
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 30;

/// Wait bound for a reachability probe; short so a dead endpoint does not
/// stall health reporting.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Client for the remote text-detection endpoint.
pub struct VisionOcrClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    image_base64: &'a str,
}

#[derive(Deserialize)]
struct DetectResponse {
    #[serde(default)]
    texts: Vec<DetectedText>,
}

#[derive(Deserialize)]
struct DetectedText {
    #[serde(default)]
    description: Option<String>,
}

/// Successful detection, before fallback handling.
#[derive(Debug, Clone)]
pub struct DetectOutcome {
    pub text: String,
    pub language: Language,
}

impl VisionOcrClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_OCR_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// One bounded detection attempt against the remote endpoint.
    ///
    /// Unlike [`TextRecognizer::recognize`], this reports failures so the
    /// gateway can map them onto distinct user-facing responses.
    pub async fn detect(&self, image_base64: &str) -> Result<DetectOutcome, EduCheckError> {
        debug!(
            endpoint = %self.endpoint,
            payload_len = image_base64.len(),
            "Sending detection request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .header("User-Agent", "EduCheck-OCR/1.0")
            .timeout(self.timeout)
            .json(&DetectRequest { image_base64 })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EduCheckError::Timeout(self.timeout.as_secs())
                } else {
                    EduCheckError::Transport {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Detection endpoint returned error");
            return Err(EduCheckError::Transport {
                status: status.as_u16(),
                message: EduCheckError::message_for_status(status.as_u16()).to_string(),
            });
        }

        let parsed: DetectResponse = response
            .json()
            .await
            .map_err(|e| EduCheckError::UnexpectedResponse(e.to_string()))?;

        let text = extract_full_text(&parsed);
        if text.is_empty() {
            return Err(EduCheckError::Validation("no text found in image".into()));
        }

        let language = detect_language(&text);
        info!(chars = text.len(), language = %language, "Detection succeeded");
        Ok(DetectOutcome { text, language })
    }

    /// Whether the endpoint currently answers at all. Any HTTP response
    /// counts as reachable; only connection failures and timeouts do not.
    pub async fn is_reachable(&self) -> bool {
        self.client
            .get(&self.endpoint)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .is_ok()
    }

    /// Encode raw image bytes for the wire.
    pub fn encode_image(image: &[u8]) -> String {
        STANDARD.encode(image)
    }
}

/// The first element carries the full text when its description is present,
/// even a blank one (which reads as "no text found" upstream); only a
/// missing first description falls through to joining all elements.
fn extract_full_text(response: &DetectResponse) -> String {
    if let Some(first) = response.texts.first() {
        if let Some(description) = &first.description {
            return description.trim().to_string();
        }
    }
    response
        .texts
        .iter()
        .filter_map(|t| t.description.as_deref())
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[async_trait]
impl TextRecognizer for VisionOcrClient {
    fn name(&self) -> &str {
        "vision"
    }

    async fn recognize(&self, image: &[u8]) -> ExtractedText {
        let image_base64 = Self::encode_image(image);
        match self.detect(&image_base64).await {
            Ok(outcome) => ExtractedText::remote(outcome.text, outcome.language),
            Err(e) => {
                warn!(error = %e, "OCR call failed, using fallback sample");
                ExtractedText::fallback(fallback_sample().to_string())
            }
        }
    }
}
