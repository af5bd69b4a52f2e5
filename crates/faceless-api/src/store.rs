//! In-memory job store.
//!
//! Process-wide mapping from job id to job record. Handlers create and read;
//! only the generation worker mutates (single-writer discipline — the
//! mutation methods are crate-private). Reads return cloned snapshots taken
//! under the lock, so a status poll never observes a half-updated record.
//!
//! Jobs are never evicted; everything is lost on restart. That matches the
//! ephemeral-by-design contract and is called out in DESIGN.md.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use faceless_models::{Job, JobId, JobSummary, Mode, Scene};

/// Process-wide job store.
#[derive(Default)]
pub struct JobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pending job and return its snapshot.
    pub async fn create(
        &self,
        mode: Mode,
        input_text: impl Into<String>,
        voice_style: impl Into<String>,
        aspect_ratio: impl Into<String>,
    ) -> Job {
        let job = Job::new(mode, input_text, voice_style, aspect_ratio);
        debug!(job_id = %job.id, mode = %job.mode, "Created job");
        self.jobs.write().await.insert(job.id.clone(), job.clone());
        job
    }

    /// Snapshot of one job.
    pub async fn get(&self, id: &JobId) -> Option<Job> {
        self.jobs.read().await.get(id).cloned()
    }

    /// Job summaries, most recently created first, truncated to `limit`.
    pub async fn list_recent(&self, limit: usize) -> Vec<JobSummary> {
        let jobs = self.jobs.read().await;
        let mut summaries: Vec<JobSummary> = jobs.values().map(Job::summary).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries.truncate(limit);
        summaries
    }

    pub(crate) async fn begin_processing(&self, id: &JobId) {
        self.mutate(id, Job::begin_processing).await;
    }

    pub(crate) async fn set_derived_script(&self, id: &JobId, script: String) {
        self.mutate(id, move |job| job.derived_script = Some(script)).await;
    }

    pub(crate) async fn set_scenes(&self, id: &JobId, scenes: Vec<Scene>) {
        self.mutate(id, move |job| job.scenes = scenes).await;
    }

    pub(crate) async fn complete(&self, id: &JobId, video_url: String) {
        self.mutate(id, move |job| job.complete(video_url)).await;
    }

    pub(crate) async fn fail(&self, id: &JobId, message: impl Into<String>) {
        let message = message.into();
        self.mutate(id, move |job| job.fail(message)).await;
    }

    /// Apply a mutation under the write lock. Terminal jobs are left alone,
    /// so no transition ever leaves `complete` or `failed`.
    async fn mutate(&self, id: &JobId, f: impl FnOnce(&mut Job)) {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(id) {
            if job.status.is_terminal() {
                return;
            }
            f(job);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faceless_models::JobStatus;

    const SCRIPT: &str = "A lion roams the savanna at sunrise. It hunts for food.";

    #[tokio::test]
    async fn test_create_and_get() {
        let store = JobStore::new();
        let job = store.create(Mode::Script, SCRIPT, "professional", "16:9").await;

        let fetched = store.get(&job.id).await.unwrap();
        assert_eq!(fetched.status, JobStatus::Pending);
        assert_eq!(fetched.input_text, SCRIPT);
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let store = JobStore::new();
        assert!(store.get(&JobId::from_string("missing")).await.is_none());
    }

    #[tokio::test]
    async fn test_list_recent_orders_and_caps() {
        let store = JobStore::new();
        let mut ids = Vec::new();
        for _ in 0..15 {
            let job = store.create(Mode::Script, SCRIPT, "professional", "16:9").await;
            ids.push(job.id.clone());
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let recent = store.list_recent(12).await;
        assert_eq!(recent.len(), 12);
        // Newest first
        assert_eq!(recent[0].id, *ids.last().unwrap());
        for pair in recent.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_terminal_jobs_are_immutable() {
        let store = JobStore::new();
        let job = store.create(Mode::Script, SCRIPT, "professional", "16:9").await;

        store.begin_processing(&job.id).await;
        store.fail(&job.id, "boom").await;

        // A late completion must not resurrect the job
        store.complete(&job.id, "/assets/videos/x.mp4".to_string()).await;

        let fetched = store.get(&job.id).await.unwrap();
        assert_eq!(fetched.status, JobStatus::Failed);
        assert!(fetched.video_url.is_none());
        assert_eq!(fetched.error.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_mutation_sequence_is_monotonic() {
        let store = JobStore::new();
        let job = store.create(Mode::Idea, "remote team building", "casual", "9:16").await;

        store.begin_processing(&job.id).await;
        assert_eq!(store.get(&job.id).await.unwrap().status, JobStatus::Processing);

        store.set_derived_script(&job.id, "script text".to_string()).await;
        store
            .set_scenes(&job.id, vec![Scene::new("script text", "script text")])
            .await;
        store.complete(&job.id, "/assets/videos/y.mp4".to_string()).await;

        let fetched = store.get(&job.id).await.unwrap();
        assert_eq!(fetched.status, JobStatus::Complete);
        assert!(fetched.video_url.is_some());
        assert!(fetched.error.is_none());
        assert!(fetched.completed_at.is_some());
    }
}
