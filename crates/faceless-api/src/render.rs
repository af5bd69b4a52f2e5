//! Render step seam.
//!
//! Rendering is an opaque long-running operation whose only observable
//! contract is a delay and a resulting asset locator. The trait exists so
//! the worker's failure path can be exercised without a real pipeline.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use faceless_models::Job;

/// Produces an asset locator for a job's video.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, job: &Job) -> anyhow::Result<String>;
}

/// Stand-in renderer: waits a fixed duration, then returns a static path
/// under the configured asset base.
pub struct SimulatedRenderer {
    delay: Duration,
    asset_base: String,
}

impl SimulatedRenderer {
    pub fn new(delay: Duration, asset_base: impl Into<String>) -> Self {
        Self {
            delay,
            asset_base: asset_base.into(),
        }
    }
}

#[async_trait]
impl Renderer for SimulatedRenderer {
    async fn render(&self, job: &Job) -> anyhow::Result<String> {
        debug!(job_id = %job.id, delay = ?self.delay, "Simulating render");
        tokio::time::sleep(self.delay).await;
        Ok(format!("{}/{}.mp4", self.asset_base, job.id))
    }
}
