//! Generation job definitions and lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{Mode, Scene};

/// Unique identifier for a generation job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job lifecycle state.
///
/// Transitions run one way only: `pending -> processing -> complete | failed`.
/// Terminal states are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Job is created and waiting for its worker
    #[default]
    Pending,
    /// Worker is generating script, scenes, and video
    Processing,
    /// Video is ready
    Complete,
    /// Generation failed
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Complete => "complete",
            JobStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One script/idea/article-to-video generation request and its tracked state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique job ID
    pub id: JobId,

    /// Current lifecycle state
    #[serde(default)]
    pub status: JobStatus,

    /// How the input text is interpreted
    #[serde(default)]
    pub mode: Mode,

    /// Raw user-provided script, idea, or article excerpt
    pub input_text: String,

    /// Working narration script. Equal to `input_text` for script mode,
    /// synthesized before scene breakdown otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_script: Option<String>,

    /// Voice preset, echoed back unmodified
    pub voice_style: String,

    /// Aspect ratio preset, echoed back unmodified
    pub aspect_ratio: String,

    /// Scene breakdown; empty until generation produces it
    #[serde(default)]
    pub scenes: Vec<Scene>,

    /// Asset locator, set only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// User-facing failure message, set only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Short human-readable label derived from the best available text
    pub title: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Set when a terminal state is reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Create a new pending job with a provisional title.
    pub fn new(
        mode: Mode,
        input_text: impl Into<String>,
        voice_style: impl Into<String>,
        aspect_ratio: impl Into<String>,
    ) -> Self {
        let input_text = input_text.into();
        Self {
            id: JobId::new(),
            status: JobStatus::Pending,
            mode,
            derived_script: None,
            voice_style: voice_style.into(),
            aspect_ratio: aspect_ratio.into(),
            scenes: Vec::new(),
            video_url: None,
            error: None,
            title: derive_title(&input_text),
            created_at: Utc::now(),
            completed_at: None,
            input_text,
        }
    }

    /// Move the job into processing and clear any prior error.
    pub fn begin_processing(&mut self) {
        self.status = JobStatus::Processing;
        self.error = None;
    }

    /// Mark the job complete with its asset locator.
    ///
    /// The title is recomputed from the first scene when that text is richer
    /// than the original snippet.
    pub fn complete(&mut self, video_url: impl Into<String>) {
        self.status = JobStatus::Complete;
        self.video_url = Some(video_url.into());
        self.error = None;
        self.completed_at = Some(Utc::now());
        if let Some(first) = self.scenes.first() {
            if first.text.len() > self.input_text.trim().len() {
                self.title = derive_title(&first.text);
            }
        }
    }

    /// Mark the job failed with a user-facing message.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.error = Some(error.into());
        self.video_url = None;
        self.completed_at = Some(Utc::now());
    }

    /// The script the scene breakdown works from.
    pub fn working_script(&self) -> &str {
        self.derived_script.as_deref().unwrap_or(&self.input_text)
    }

    /// Dashboard projection of this job.
    pub fn summary(&self) -> JobSummary {
        JobSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            mode: self.mode,
            status: self.status,
            video_url: self.video_url.clone(),
            created_at: self.created_at,
            completed_at: self.completed_at,
            voice_style: self.voice_style.clone(),
            aspect_ratio: self.aspect_ratio.clone(),
        }
    }
}

/// Compact job representation for the recent-jobs dashboard list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub mode: Mode,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub voice_style: String,
    pub aspect_ratio: String,
}

/// Maximum title length in characters before truncation.
const TITLE_MAX_CHARS: usize = 60;

/// Derive a short label from free text: the first sentence, truncated.
pub fn derive_title(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "Untitled video".to_string();
    }

    let first = trimmed
        .split(['.', '!', '?', '\n'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(trimmed);

    if first.chars().count() <= TITLE_MAX_CHARS {
        first.to_string()
    } else {
        let cut: String = first.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}…", cut.trim_end())
    }
}
