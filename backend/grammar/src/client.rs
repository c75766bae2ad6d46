use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use educheck_core::{
    EduCheckError, ErrorKind, GrammarChecker, GrammarError, GrammarOutcome, Language,
};

use crate::mock::generate_mock_errors;

/// Client-side wait bound for a single check call.
pub const DEFAULT_GRAMMAR_TIMEOUT_SECS: u64 = 25;

/// Wait bound for a reachability probe; short so a dead endpoint does not
/// stall health reporting.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Client for the remote grammar-checking endpoint.
pub struct TahrirchiClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
    auth_token: Option<String>,
}

#[derive(Serialize)]
struct CheckRequest {
    nodes: Vec<CheckNode>,
    /// Alphabet selector: 1 for Latin, 2 for Cyrillic.
    ws: u8,
}

#[derive(Serialize)]
struct CheckNode {
    fields: Vec<CheckField>,
    offset: usize,
}

#[derive(Serialize)]
struct CheckField {
    value: String,
    markup: bool,
}

#[derive(Deserialize)]
struct CheckResponse {
    action: Option<String>,
    #[serde(default)]
    data: Vec<Suggestion>,
}

#[derive(Deserialize)]
struct Suggestion {
    token: Option<String>,
    #[serde(rename = "type")]
    type_code: Option<i64>,
    #[serde(default)]
    corrections: Vec<String>,
    offset: Option<usize>,
    length: Option<usize>,
    sentence_start: Option<usize>,
    sentence_end: Option<usize>,
}

impl TahrirchiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_GRAMMAR_TIMEOUT_SECS),
            auth_token: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// One bounded check attempt against the remote endpoint.
    ///
    /// Exposed for the gateway proxy; pipeline callers go through
    /// [`GrammarChecker::check`], which absorbs failures into the mock
    /// generator.
    pub async fn check_remote(&self, text: &str) -> Result<Vec<GrammarError>, EduCheckError> {
        let body = CheckRequest {
            nodes: vec![CheckNode {
                fields: vec![CheckField {
                    value: text.to_string(),
                    markup: false,
                }],
                offset: 0,
            }],
            ws: 1,
        };

        debug!(endpoint = %self.endpoint, chars = text.len(), "Sending grammar check");

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .header("User-Agent", "EduCheck/1.0")
            .timeout(self.timeout)
            .json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
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
            return Err(EduCheckError::Transport {
                status: status.as_u16(),
                message: EduCheckError::message_for_status(status.as_u16()).to_string(),
            });
        }

        let parsed: CheckResponse = response
            .json()
            .await
            .map_err(|e| EduCheckError::UnexpectedResponse(e.to_string()))?;

        let errors = parse_suggestions(parsed, text);
        info!(count = errors.len(), "Grammar check succeeded");
        Ok(errors)
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
}

/// Map the remote `SUGGESTIONS` payload onto typed errors.
///
/// Items missing a token or carrying an empty corrections list are silently
/// dropped, as are spans that do not fit inside `text`; a bad item never
/// fails the whole call.
fn parse_suggestions(response: CheckResponse, text: &str) -> Vec<GrammarError> {
    if response.action.as_deref() != Some("SUGGESTIONS") {
        return Vec::new();
    }

    let mut errors = Vec::new();
    for item in response.data {
        let Some(token) = item.token.filter(|t| !t.is_empty()) else {
            continue;
        };
        if item.corrections.is_empty() {
            continue;
        }

        let kind = ErrorKind::from_code(item.type_code.unwrap_or(1));
        let position = item.offset.unwrap_or(0);
        let length = item.length.unwrap_or(token.len());
        let error = GrammarError {
            position,
            length,
            text: token,
            correction: item.corrections[0].clone(),
            corrections: item.corrections,
            kind,
            description: kind.description().to_string(),
            sentence_start: item.sentence_start.unwrap_or(0),
            sentence_end: item.sentence_end.unwrap_or(text.len()),
        };
        if !error.in_bounds(text) {
            debug!(token = %error.text, position, length, "Dropping out-of-bounds suggestion");
            continue;
        }
        errors.push(error);
    }
    errors
}

#[async_trait]
impl GrammarChecker for TahrirchiClient {
    fn name(&self) -> &str {
        "tahrirchi"
    }

    async fn check(&self, text: &str, language: Language) -> GrammarOutcome {
        if text.trim().is_empty() {
            return GrammarOutcome::validation();
        }

        debug!(language = %language, "Checking grammar");
        match self.check_remote(text).await {
            Ok(errors) => GrammarOutcome::remote(errors),
            Err(e) => {
                warn!(error = %e, "Grammar call failed, generating mock errors");
                GrammarOutcome::mock(generate_mock_errors(text))
            }
        }
    }
}
