//! Minimal client for the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::error::ModelError;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Sends single-turn text prompts to a Gemini model.
///
/// The API key is optional so callers can hold a client even when no
/// credential is configured; [`GeminiClient::generate`] then fails with
/// [`ModelError::MissingCredential`] without touching the network.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// Creates a client. A blank `api_key` counts as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: GEMINI_API_BASE.to_owned(),
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends `prompt` to `model` and returns the first candidate's text.
    ///
    /// # Errors
    ///
    /// - [`ModelError::MissingCredential`]: no API key configured.
    /// - [`ModelError::RateLimited`]: HTTP 429.
    /// - [`ModelError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ModelError::Http`]: network or TLS failure.
    /// - [`ModelError::MalformedReply`]: the body carries no candidate text.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingCredential)?;
        let url = format!("{}/v1beta/models/{model}:generateContent", self.base_url);

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Http(e.without_url()))?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ModelError::RateLimited {
                model: model.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ModelError::UnexpectedStatus {
                status: status.as_u16(),
                model: model.to_owned(),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| {
                ModelError::MalformedReply(format!("response body: {}", e.without_url()))
            })?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| ModelError::MalformedReply("no candidate text".to_owned()))
    }
}
