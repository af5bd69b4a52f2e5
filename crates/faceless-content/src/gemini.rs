//! Gemini API client for script and scene generation.
//!
//! Thin wrapper over the generateContent REST endpoint. Models are tried in
//! a fixed order; the first usable response wins. Responses are returned as
//! raw text with markdown code fences stripped, leaving interpretation to
//! the caller.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Default Gemini REST endpoint base.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Models tried in order until one responds usably.
const MODELS: [&str; 3] = ["gemini-2.5-flash", "gemini-2.5-flash-lite", "gemini-2.5-pro"];

pub type ContentResult<T> = Result<T, ContentError>;

/// Errors from the provider client. These never escape the content engine;
/// every one of them routes to the fallback generators.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Gemini request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no content in Gemini response")]
    Empty,

    #[error("failed to parse model output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiClient {
    /// Create a client for the public Gemini endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Override the endpoint base. Used by tests to point at a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request a strict-JSON completion for the prompt.
    pub async fn generate_json(&self, prompt: &str) -> ContentResult<String> {
        self.generate(prompt, "application/json").await
    }

    /// Request a plain-text completion for the prompt.
    pub async fn generate_text(&self, prompt: &str) -> ContentResult<String> {
        self.generate(prompt, "text/plain").await
    }

    async fn generate(&self, prompt: &str, mime_type: &str) -> ContentResult<String> {
        let mut last_error = None;

        for model in &MODELS {
            match self.call_model(model, prompt, mime_type).await {
                Ok(text) => {
                    info!(model, "Gemini generation succeeded");
                    return Ok(text);
                }
                Err(e) => {
                    warn!(model, error = %e, "Gemini model attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ContentError::Empty))
    }

    async fn call_model(&self, model: &str, prompt: &str, mime_type: &str) -> ContentResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: mime_type.to_string(),
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Status { status, body });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or(ContentError::Empty)?;

        Ok(strip_code_fences(text).to_string())
    }
}

/// Strip markdown code fences the model sometimes wraps JSON in.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}
