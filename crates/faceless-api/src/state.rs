//! Application state.

use std::sync::Arc;

use faceless_content::ContentEngine;

use crate::config::ApiConfig;
use crate::render::{Renderer, SimulatedRenderer};
use crate::store::JobStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<JobStore>,
    pub engine: Arc<ContentEngine>,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// Create application state with the engine configured from the
    /// environment (`GEMINI_API_KEY` optional) and the simulated renderer.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_engine(config, ContentEngine::from_env())
    }

    /// Create state around a specific content engine.
    pub fn with_engine(config: ApiConfig, engine: ContentEngine) -> Self {
        let renderer = Arc::new(SimulatedRenderer::new(
            config.render_delay,
            config.asset_base.clone(),
        ));
        Self {
            config,
            store: Arc::new(JobStore::new()),
            engine: Arc::new(engine),
            renderer,
        }
    }

    /// Swap the renderer. Used by tests to inject failures.
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }
}
