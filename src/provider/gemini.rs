//! Google Gemini `generateContent` driver.
//!
//! Request/response particulars:
//! - Body uses `contents` with `parts`, not `messages`.
//! - Response text lives at `candidates[0].content.parts[0].text`.
//! - The API key travels as a `?key=` query parameter, not a header.
//! - Error bodies are `{ "error": { code, message, status, details } }`;
//!   rate limits surface as HTTP 429 with status `RESOURCE_EXHAUSTED` and
//!   may carry a `RetryInfo` detail with a `retryDelay` like `"14s"`.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;
use uuid::Uuid;

use crate::error::Error;
use crate::Result;

use super::{LookupProvider, ModelInfo};

pub const DEFAULT_MODEL: &str = "gemma-3-12b-it";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        // Env-overridable defaults, resolved once at construction.
        let timeout_secs = env::var("VOCAB_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);
        Self {
            api_key: api_key.into(),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Thin client over the Gemini REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// List models that support the `generateContent` method.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/models", self.config.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(remote_error(status.as_u16(), &body));
        }

        let body: Value = resp.json().await?;
        let models = body
            .get("models")
            .and_then(|m| m.as_array())
            .map(|models| {
                models
                    .iter()
                    .filter(|m| supports_generate_content(m))
                    .map(model_info)
                    .collect()
            })
            .unwrap_or_default();
        Ok(models)
    }
}

#[async_trait]
impl LookupProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        let request_id = Uuid::new_v4().to_string();

        tracing::debug!(model = %self.config.model, request_id = %request_id, "gemini generateContent");
        let resp = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .header("x-request-id", request_id.as_str())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = remote_error(status.as_u16(), &body);
            tracing::error!(status = status.as_u16(), request_id = %request_id, error = %err, "gemini request failed");
            return Err(err);
        }

        let body: Value = resp.json().await?;
        match extract_text(&body) {
            Some(text) => Ok(text),
            None => Err(Error::Provider(
                "Failed to generate response from AI".to_string(),
            )),
        }
    }
}

/// Pull the generated text out of a `generateContent` response.
fn extract_text(body: &Value) -> Option<String> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(|v| v.as_str())
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// Map a non-2xx Gemini response into a structured [`Error::Remote`].
fn remote_error(status: u16, body: &str) -> Error {
    let json: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let api_status = json.pointer("/error/status").and_then(|v| v.as_str());
    let code = json.pointer("/error/code").and_then(|v| v.as_u64());
    let message = json
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap_or_else(|| format!("HTTP {status}"));

    let class = classify(status, code, api_status);
    Error::Remote {
        status,
        class: class.to_string(),
        message,
        retryable: matches!(
            class,
            "rate_limited" | "quota_exhausted" | "overloaded" | "server_error" | "timeout"
        ),
        retry_after_ms: retry_delay_hint(&json),
    }
}

/// Classify a Gemini error structurally: HTTP status first, refined by the
/// API's own status marker. Never matches on message text.
fn classify(status: u16, code: Option<u64>, api_status: Option<&str>) -> &'static str {
    if status == 429 || code == Some(429) || api_status == Some("RESOURCE_EXHAUSTED") {
        return "rate_limited";
    }
    match status {
        400 => "invalid_request",
        401 => "authentication",
        403 => "permission_denied",
        404 => "not_found",
        408 => "timeout",
        503 => "overloaded",
        s if (500..=599).contains(&s) => "server_error",
        _ => "http_error",
    }
}

/// Extract the provider's `RetryInfo.retryDelay` hint (e.g. `"14s"`),
/// converted to milliseconds. Parses the leading integer seconds only.
fn retry_delay_hint(json: &Value) -> Option<u64> {
    let details = json.pointer("/error/details")?.as_array()?;
    details
        .iter()
        .find_map(|d| d.get("retryDelay").and_then(|v| v.as_str()))
        .and_then(parse_retry_delay)
}

fn parse_retry_delay(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u64>().ok().map(|secs| secs * 1000)
}

fn supports_generate_content(model: &Value) -> bool {
    model
        .get("supportedGenerationMethods")
        .and_then(|m| m.as_array())
        .map(|methods| methods.iter().any(|m| m.as_str() == Some("generateContent")))
        .unwrap_or(false)
}

fn model_info(model: &Value) -> ModelInfo {
    let full_name = model
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    ModelInfo {
        name: full_name
            .strip_prefix("models/")
            .unwrap_or(&full_name)
            .to_string(),
        full_name: full_name.clone(),
        display_name: model
            .get("displayName")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        description: model
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        supported_methods: model
            .get("supportedGenerationMethods")
            .and_then(|m| m.as_array())
            .map(|methods| {
                methods
                    .iter()
                    .filter_map(|m| m.as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
        input_token_limit: model.get("inputTokenLimit").and_then(|v| v.as_u64()),
        output_token_limit: model.get("outputTokenLimit").and_then(|v| v.as_u64()),
        version: model
            .get("version")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
    }
}
