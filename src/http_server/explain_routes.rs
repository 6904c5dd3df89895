//! Explain HTTP Routes
//!
//! HTTP endpoints that run lecture text through the [`Explainer`].
//!
//! Request bodies are parsed leniently: a missing, `null` or non-string
//! `text` is treated as empty text, and a body that is not a JSON object is
//! treated as an empty request. The only transport-level rejections are text
//! longer than the configured limit and batches with too many entries.
//!
//! Body limits are raised per route to fit `max_text_chars`, so an in-limit
//! request is always buffered. Bodies that exceed them still get an
//! `{"error", "code"}` reply.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::config::HttpServerConfig;
use crate::engine::{Explainer, RuleSet};
use crate::observability::{log_event_with_fields, log_explanation, Event, MetricsRegistry};

/// Shared explain state
pub struct ExplainState {
    pub explainer: Explainer,
    pub metrics: Arc<MetricsRegistry>,
    pub max_text_chars: usize,
    pub max_batch_texts: usize,
    pub text_body_limit: usize,
    pub batch_body_limit: usize,
}

impl ExplainState {
    /// Create explain state with limits taken from the server config
    pub fn new(
        explainer: Explainer,
        metrics: Arc<MetricsRegistry>,
        config: &HttpServerConfig,
    ) -> Self {
        Self {
            explainer,
            metrics,
            max_text_chars: config.max_text_chars,
            max_batch_texts: config.max_batch_texts,
            text_body_limit: config.text_body_limit(),
            batch_body_limit: config.batch_body_limit(),
        }
    }
}

/// Explain routes with shared state
pub fn explain_routes(state: Arc<ExplainState>) -> Router {
    Router::new()
        .route(
            "/process",
            post(process_handler).layer(DefaultBodyLimit::max(state.text_body_limit)),
        )
        .route(
            "/process/batch",
            post(batch_handler).layer(DefaultBodyLimit::max(state.batch_body_limit)),
        )
        .route("/rules", get(rules_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

/// Single explain request
#[derive(Debug, Default, Deserialize)]
pub struct ExplainRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: Option<String>,
}

/// Batch explain request
#[derive(Debug, Default, Deserialize)]
pub struct BatchExplainRequest {
    #[serde(default)]
    pub texts: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct BatchExplainResponse {
    pub results: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    fn reply(status: StatusCode, error: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                error: error.into(),
                code: status.as_u16(),
            }),
        )
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Accept any JSON value; keep it only if it is a string
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl ExplainRequest {
    /// Parse a request body; anything unparseable is an empty request
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

impl BatchExplainRequest {
    /// Parse a request body; anything unparseable has no `texts`
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

// ==================
// Handlers
// ==================

impl ExplainState {
    fn reject(&self, reason: &str, status: StatusCode, error: String) -> HandlerError {
        self.metrics.increment_rejected();
        log_event_with_fields(Event::RequestRejected, &[("reason", reason)]);
        ErrorResponse::reply(status, error)
    }

    fn body(&self, body: Result<Bytes, BytesRejection>) -> Result<Bytes, HandlerError> {
        body.map_err(|rejection| {
            self.reject("body_rejected", rejection.status(), rejection.body_text())
        })
    }

    fn check_length(&self, text: Option<&str>) -> Result<usize, HandlerError> {
        let chars = text.map(|t| t.chars().count()).unwrap_or(0);
        if chars > self.max_text_chars {
            return Err(self.reject(
                "text_too_long",
                StatusCode::PAYLOAD_TOO_LARGE,
                format!(
                    "Text too long. Maximum {} characters.",
                    self.max_text_chars
                ),
            ));
        }
        Ok(chars)
    }

    fn explain(&self, text: Option<&str>, chars: usize) -> String {
        let explanation = self.explainer.explain_detailed(text);
        self.metrics.record(&explanation.outcome);
        log_explanation(&explanation, chars);
        explanation.result
    }
}

/// Explain one block of text
async fn process_handler(
    State(state): State<Arc<ExplainState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ExplainResponse>, HandlerError> {
    let body = state.body(body)?;
    let request = ExplainRequest::from_body(&body);
    let text = request.text.as_deref();

    let chars = state.check_length(text)?;
    let result = state.explain(text, chars);

    Ok(Json(ExplainResponse { result }))
}

/// Explain several blocks of text, one result per entry
async fn batch_handler(
    State(state): State<Arc<ExplainState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<BatchExplainResponse>, HandlerError> {
    let body = state.body(body)?;
    let Some(texts) = BatchExplainRequest::from_body(&body).texts else {
        return Err(state.reject(
            "missing_texts",
            StatusCode::BAD_REQUEST,
            "Please provide an array of texts".to_string(),
        ));
    };

    if texts.len() > state.max_batch_texts {
        return Err(state.reject(
            "too_many_texts",
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "Too many texts. Maximum {} per batch.",
                state.max_batch_texts
            ),
        ));
    }

    let texts: Vec<Option<&str>> = texts.iter().map(Value::as_str).collect();

    let mut lengths = Vec::with_capacity(texts.len());
    for text in &texts {
        lengths.push(state.check_length(*text)?);
    }

    let results = texts
        .iter()
        .zip(lengths)
        .map(|(text, chars)| state.explain(*text, chars))
        .collect();

    Ok(Json(BatchExplainResponse { results }))
}

/// The loaded rule table
async fn rules_handler(State(state): State<Arc<ExplainState>>) -> impl IntoResponse {
    let rules: &RuleSet = state.explainer.rules();
    (StatusCode::OK, Json(rules.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_text_string() {
        let request = ExplainRequest::from_body(br#"{"text": "Machine Learning"}"#);
        assert_eq!(request.text.as_deref(), Some("Machine Learning"));
    }

    #[test]
    fn test_request_non_string_text_is_absent() {
        assert_eq!(ExplainRequest::from_body(br#"{"text": 42}"#).text, None);
        assert_eq!(ExplainRequest::from_body(br#"{"text": null}"#).text, None);
        assert_eq!(ExplainRequest::from_body(br#"{"text": ["a"]}"#).text, None);
    }

    #[test]
    fn test_request_missing_or_malformed_body() {
        assert_eq!(ExplainRequest::from_body(b"{}").text, None);
        assert_eq!(ExplainRequest::from_body(b"").text, None);
        assert_eq!(ExplainRequest::from_body(b"not json").text, None);
        assert_eq!(ExplainRequest::from_body(b"[1, 2]").text, None);
    }

    #[test]
    fn test_batch_request_parsing() {
        let request = BatchExplainRequest::from_body(br#"{"texts": ["ai", 3, null]}"#);
        assert_eq!(request.texts.map(|t| t.len()), Some(3));
        assert!(BatchExplainRequest::from_body(b"{}").texts.is_none());
    }

    #[test]
    fn test_check_length() {
        let config = HttpServerConfig {
            max_text_chars: 5,
            ..Default::default()
        };
        let state = ExplainState::new(Explainer::builtin(), Arc::new(MetricsRegistry::new()), &config);
        assert_eq!(state.text_body_limit, config.text_body_limit());
        assert_eq!(state.check_length(Some("héllo")).unwrap(), 5);
        assert_eq!(state.check_length(None).unwrap(), 0);

        let (status, Json(body)) = state.check_length(Some("too long")).unwrap_err();
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body.code, 413);
        assert_eq!(state.metrics.snapshot().rejected, 1);
    }
}
