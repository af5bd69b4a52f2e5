//! HTTP client for the generation API.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use faceless_models::{JobId, JobStatus, JobSummary, Mode, Scene, ASPECT_PRESETS, VOICE_PRESETS};

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the request with a message.
    #[error("{0}")]
    Rejected(String),

    #[error("job not found")]
    NotFound,

    #[error("malformed response from server")]
    Malformed,
}

/// A submission: one input text interpreted per the chosen mode.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub mode: Mode,
    pub text: String,
    pub voice_style: String,
    pub aspect_ratio: String,
}

impl GenerateRequest {
    pub fn new(mode: Mode, text: impl Into<String>) -> Self {
        Self {
            mode,
            text: text.into(),
            voice_style: VOICE_PRESETS[0].to_string(),
            aspect_ratio: ASPECT_PRESETS[0].to_string(),
        }
    }

    /// Wire shape: the text travels under the mode-specific key.
    fn to_wire(&self) -> serde_json::Value {
        let mut body = json!({
            "mode": self.mode.as_str(),
            "voiceStyle": self.voice_style,
            "aspectRatio": self.aspect_ratio,
        });
        body[self.mode.as_str()] = json!(self.text);
        body
    }
}

/// Status snapshot returned by `video-status/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub status: JobStatus,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub error: Option<String>,
    pub mode: Mode,
    pub title: String,
    pub voice_style: String,
    pub aspect_ratio: String,
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    #[serde(default)]
    job_id: Option<JobId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
}

/// Thin wrapper over the three generation endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// POST generate-video. Returns the new job id.
    pub async fn submit(&self, request: &GenerateRequest) -> ClientResult<JobId> {
        let response = self
            .http
            .post(format!("{}/api/generate-video", self.base_url))
            .json(&request.to_wire())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Rejected(Self::server_message(response).await));
        }

        let body: SubmitResponse = response.json().await.map_err(|_| ClientError::Malformed)?;
        body.job_id.ok_or(ClientError::Malformed)
    }

    /// GET video-status/{id}.
    pub async fn status(&self, job_id: &JobId) -> ClientResult<StatusPayload> {
        let response = self
            .http
            .get(format!("{}/api/video-status/{}", self.base_url, job_id))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            status if status.is_success() => {
                response.json().await.map_err(|_| ClientError::Malformed)
            }
            _ => Err(ClientError::Rejected(Self::server_message(response).await)),
        }
    }

    /// GET jobs/recent.
    pub async fn recent(&self) -> ClientResult<Vec<JobSummary>> {
        let response = self
            .http
            .get(format!("{}/api/jobs/recent", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Rejected(Self::server_message(response).await));
        }

        response.json().await.map_err(|_| ClientError::Malformed)
    }

    async fn server_message(response: reqwest::Response) -> String {
        response
            .json::<ErrorEnvelope>()
            .await
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| "Request failed.".to_string())
    }
}
