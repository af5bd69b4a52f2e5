//! Job submission and status polling handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use faceless_models::{
    validate_input, JobId, JobStatus, Mode, Scene, ASPECT_PRESETS, VOICE_PRESETS,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::worker::spawn_generation;

/// Request body for `POST /api/generate-video`.
///
/// Exactly one of `script`, `idea`, `article` is expected, matching `mode`.
/// Unrecognized modes are treated as `script`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoRequest {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub idea: Option<String>,
    #[serde(default)]
    pub article: Option<String>,
    #[serde(default)]
    pub voice_style: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
}

/// Response for a successful submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    pub success: bool,
    pub job_id: JobId,
}

/// Response for `GET /api/video-status/:job_id`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatusResponse {
    pub success: bool,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub scenes: Vec<Scene>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub mode: Mode,
    pub title: String,
    pub voice_style: String,
    pub aspect_ratio: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

/// POST /api/generate-video
///
/// Validates the mode-appropriate input, creates a pending job, starts its
/// worker detached, and returns the job id immediately. Never blocks on
/// generation.
pub async fn submit_job(
    State(state): State<AppState>,
    Json(request): Json<GenerateVideoRequest>,
) -> ApiResult<Json<GenerateVideoResponse>> {
    let mode = request
        .mode
        .as_deref()
        .map(Mode::parse_lenient)
        .unwrap_or_default();

    let text = match mode {
        Mode::Script => request.script.as_deref(),
        Mode::Idea => request.idea.as_deref(),
        Mode::Article => request.article.as_deref(),
    }
    .unwrap_or_default();

    let trimmed = validate_input(mode, text)?;

    let voice_style = request
        .voice_style
        .unwrap_or_else(|| VOICE_PRESETS[0].to_string());
    let aspect_ratio = request
        .aspect_ratio
        .unwrap_or_else(|| ASPECT_PRESETS[0].to_string());

    let job = state
        .store
        .create(mode, trimmed, voice_style, aspect_ratio)
        .await;

    info!(job_id = %job.id, mode = %mode, "Accepted generation job");
    spawn_generation(state.clone(), job.id.clone());

    Ok(Json(GenerateVideoResponse {
        success: true,
        job_id: job.id,
    }))
}

/// GET /api/video-status/:job_id
///
/// Returns the full status snapshot, or 404 for an unknown id. Unknown is
/// distinct from failed: the store is in-memory, so ids stop resolving
/// after a process restart.
pub async fn get_video_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<VideoStatusResponse>> {
    let job = state
        .store
        .get(&JobId::from_string(job_id))
        .await
        .ok_or_else(|| ApiError::not_found("Job not found."))?;

    Ok(Json(VideoStatusResponse {
        success: true,
        status: job.status,
        video_url: job.video_url,
        scenes: job.scenes,
        error: job.error,
        mode: job.mode,
        title: job.title,
        voice_style: job.voice_style,
        aspect_ratio: job.aspect_ratio,
        created_at: job.created_at.to_rfc3339(),
        completed_at: job.completed_at.map(|t| t.to_rfc3339()),
    }))
}
