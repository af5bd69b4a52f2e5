//! Generation worker.
//!
//! Drives one job from `pending` to a terminal state: derive a script when
//! the mode requires it, break it into scenes, run the render step, then
//! complete. The task is fire-and-forget relative to the submitting request;
//! the handler returns the job id as soon as the job exists.
//!
//! Failure policy: the content engine never errors (it falls back), so the
//! only failure paths are an empty synthesized script — surfaced with a
//! specific message — and an unexpected error from the render step, which
//! maps to a generic message. Internal detail stays in the logs.

use anyhow::Context;
use tracing::{error, info};

use faceless_models::{JobId, Mode};

use crate::state::AppState;

/// Generic user-facing message for unexpected worker failures.
const GENERIC_FAILURE: &str = "Video generation failed. Please try again.";

/// Message for the one surfaced generation-stage failure: script synthesis
/// produced nothing, which can only happen if submission validation was
/// bypassed.
const EMPTY_SCRIPT_FAILURE: &str =
    "We couldn't turn your prompt into a script. Add more detail and try again.";

/// Spawn the detached worker task for a job.
pub fn spawn_generation(state: AppState, job_id: JobId) {
    tokio::spawn(async move {
        if let Err(e) = run_generation(&state, &job_id).await {
            error!(job_id = %job_id, error = ?e, "Generation worker failed");
            state.store.fail(&job_id, GENERIC_FAILURE).await;
        }
    });
}

async fn run_generation(state: &AppState, job_id: &JobId) -> anyhow::Result<()> {
    state.store.begin_processing(job_id).await;

    let job = state
        .store
        .get(job_id)
        .await
        .context("job missing from store")?;

    // Idea and article modes need a narration script before scene breakdown.
    if job.mode != Mode::Script {
        let script = match job.mode {
            Mode::Idea => state.engine.script_from_idea(&job.input_text).await,
            Mode::Article => state.engine.script_from_article(&job.input_text).await,
            Mode::Script => unreachable!(),
        };

        if script.trim().is_empty() {
            state.store.fail(job_id, EMPTY_SCRIPT_FAILURE).await;
            return Ok(());
        }

        state.store.set_derived_script(job_id, script).await;
    }

    let job = state
        .store
        .get(job_id)
        .await
        .context("job missing from store")?;

    let scenes = state.engine.scenes_for_script(job.working_script()).await;
    state.store.set_scenes(job_id, scenes).await;

    let job = state
        .store
        .get(job_id)
        .await
        .context("job missing from store")?;

    let video_url = state.renderer.render(&job).await?;
    state.store.complete(job_id, video_url).await;

    info!(job_id = %job_id, "Generation complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use faceless_content::ContentEngine;
    use faceless_models::{Job, JobStatus};

    use crate::config::ApiConfig;
    use crate::render::{Renderer, SimulatedRenderer};

    struct FailingRenderer;

    #[async_trait]
    impl Renderer for FailingRenderer {
        async fn render(&self, _job: &Job) -> anyhow::Result<String> {
            anyhow::bail!("encoder crashed")
        }
    }

    fn test_state() -> AppState {
        let config = ApiConfig {
            render_delay: Duration::ZERO,
            ..ApiConfig::default()
        };
        let state = AppState::with_engine(config.clone(), ContentEngine::new(None));
        state.with_renderer(Arc::new(SimulatedRenderer::new(
            Duration::ZERO,
            config.asset_base,
        )))
    }

    #[tokio::test]
    async fn test_script_mode_completes_with_scenes() {
        let state = test_state();
        let job = state
            .store
            .create(
                Mode::Script,
                "A lion roams the savanna at sunrise. It hunts for food. It returns to its pride.",
                "professional",
                "16:9",
            )
            .await;

        run_generation(&state, &job.id).await.unwrap();

        let done = state.store.get(&job.id).await.unwrap();
        assert_eq!(done.status, JobStatus::Complete);
        assert_eq!(done.scenes.len(), 3);
        assert!(done.derived_script.is_none());
        assert_eq!(
            done.video_url.as_deref(),
            Some(format!("/assets/videos/{}.mp4", job.id).as_str())
        );
        assert!(done.error.is_none());
        assert!(done.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_idea_mode_derives_four_paragraph_script() {
        let state = test_state();
        let job = state
            .store
            .create(Mode::Idea, "remote team building", "casual", "9:16")
            .await;

        run_generation(&state, &job.id).await.unwrap();

        let done = state.store.get(&job.id).await.unwrap();
        assert_eq!(done.status, JobStatus::Complete);

        let script = done.derived_script.as_deref().unwrap();
        let paragraphs: Vec<&str> = script.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 4);
        assert!(paragraphs.iter().all(|p| p.contains("remote team building")));
        assert!(!done.scenes.is_empty());
    }

    #[tokio::test]
    async fn test_article_mode_derives_summary_script() {
        let state = test_state();
        let job = state
            .store
            .create(
                Mode::Article,
                "Remote work rose sharply. Offices shrank. Focus improved. Hybrid stays.",
                "storyteller",
                "1:1",
            )
            .await;

        run_generation(&state, &job.id).await.unwrap();

        let done = state.store.get(&job.id).await.unwrap();
        assert_eq!(done.status, JobStatus::Complete);
        assert!(done
            .derived_script
            .as_deref()
            .unwrap()
            .starts_with("Remote work rose sharply."));
    }

    #[tokio::test]
    async fn test_empty_synthesized_script_fails_with_specific_message() {
        let state = test_state();
        // Bypass submission validation deliberately: an empty idea reaches
        // the worker only if the caller skipped the input checks.
        let job = state.store.create(Mode::Idea, "   ", "casual", "16:9").await;

        run_generation(&state, &job.id).await.unwrap();

        let done = state.store.get(&job.id).await.unwrap();
        assert_eq!(done.status, JobStatus::Failed);
        assert_eq!(done.error.as_deref(), Some(EMPTY_SCRIPT_FAILURE));
        assert!(done.video_url.is_none());
        assert!(done.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_render_failure_maps_to_generic_message() {
        let state = test_state().with_renderer(Arc::new(FailingRenderer));
        let job = state
            .store
            .create(
                Mode::Script,
                "A script long enough to pass validation checks.",
                "professional",
                "16:9",
            )
            .await;

        spawn_generation(state.clone(), job.id.clone());

        // Wait for the detached task to settle.
        let mut done = None;
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            let snapshot = state.store.get(&job.id).await.unwrap();
            if snapshot.status.is_terminal() {
                done = Some(snapshot);
                break;
            }
        }

        let done = done.expect("job never reached a terminal state");
        assert_eq!(done.status, JobStatus::Failed);
        assert_eq!(done.error.as_deref(), Some(GENERIC_FAILURE));
        assert!(done.video_url.is_none());
        assert!(done.completed_at.is_some());
    }
}
