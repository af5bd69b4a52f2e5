//! Content engine: Gemini-backed generation with silent fallback.
//!
//! The contract callers rely on: none of these operations ever return an
//! error. A missing credential, transport failure, malformed response, or
//! empty result all degrade to the deterministic [`fallback`] generators.
//! Degradation is logged, never surfaced, so the job state machine needs no
//! "degraded" state.

use serde::Deserialize;
use tracing::{debug, warn};

use faceless_models::Scene;

use crate::fallback;
use crate::gemini::GeminiClient;

/// Scene and script generator with an optional AI provider behind it.
pub struct ContentEngine {
    gemini: Option<GeminiClient>,
}

/// Scene plan shape requested from the model.
#[derive(Debug, Deserialize)]
struct ScenePlan {
    scenes: Vec<SceneDraft>,
}

#[derive(Debug, Deserialize)]
struct SceneDraft {
    text: String,
    #[serde(default)]
    keywords: Keywords,
}

/// Models occasionally return keyword arrays despite being asked for a
/// space-joined string. Accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Keywords {
    Joined(String),
    List(Vec<String>),
}

impl Default for Keywords {
    fn default() -> Self {
        Keywords::Joined(String::new())
    }
}

impl Keywords {
    fn into_joined(self) -> String {
        let joined = match self {
            Keywords::Joined(s) => s,
            Keywords::List(items) => items.join(" "),
        };
        joined
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ContentEngine {
    /// Create an engine. `None` or an empty credential disables the provider
    /// entirely; every request then routes straight to the fallback layer.
    pub fn new(api_key: Option<String>) -> Self {
        let gemini = api_key
            .filter(|key| !key.trim().is_empty())
            .map(GeminiClient::new);
        if gemini.is_none() {
            debug!("No Gemini credential configured; using fallback generators only");
        }
        Self { gemini }
    }

    /// Create an engine from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GEMINI_API_KEY").ok())
    }

    /// Create an engine around a preconfigured client. Used by tests.
    pub fn with_client(client: GeminiClient) -> Self {
        Self {
            gemini: Some(client),
        }
    }

    /// Break a script into scenes. Always returns at least one scene.
    pub async fn scenes_for_script(&self, script: &str) -> Vec<Scene> {
        if let Some(client) = &self.gemini {
            match client.generate_json(&scene_prompt(script)).await {
                Ok(raw) => match parse_scene_plan(&raw) {
                    Some(scenes) => return scenes,
                    None => {
                        warn!("Gemini scene plan unusable, falling back to heuristic breakdown");
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Gemini scene generation failed, using fallback");
                }
            }
        }
        fallback::scenes_from_script(script)
    }

    /// Turn an idea into a narration script.
    pub async fn script_from_idea(&self, idea: &str) -> String {
        if let Some(client) = &self.gemini {
            match client.generate_text(&idea_prompt(idea)).await {
                Ok(text) if !text.trim().is_empty() => return text.trim().to_string(),
                Ok(_) => warn!("Gemini returned an empty idea script, using fallback"),
                Err(e) => warn!(error = %e, "Gemini idea script failed, using fallback"),
            }
        }
        fallback::script_from_idea(idea)
    }

    /// Summarize an article into a narration script.
    pub async fn script_from_article(&self, article: &str) -> String {
        if let Some(client) = &self.gemini {
            match client.generate_text(&article_prompt(article)).await {
                Ok(text) if !text.trim().is_empty() => return text.trim().to_string(),
                Ok(_) => warn!("Gemini returned an empty article script, using fallback"),
                Err(e) => warn!(error = %e, "Gemini article script failed, using fallback"),
            }
        }
        fallback::script_from_article(article)
    }
}

/// Parse the model's scene plan, accepting it only when non-empty and every
/// scene carries text.
fn parse_scene_plan(raw: &str) -> Option<Vec<Scene>> {
    let plan: ScenePlan = serde_json::from_str(raw).ok()?;
    if plan.scenes.is_empty() {
        return None;
    }

    let scenes: Vec<Scene> = plan
        .scenes
        .into_iter()
        .enumerate()
        .filter_map(|(index, draft)| {
            let text = draft.text.trim().to_string();
            if text.is_empty() {
                return None;
            }
            let mut keywords = draft.keywords.into_joined();
            if keywords.is_empty() {
                keywords = format!("scene {}", index + 1);
            }
            Some(Scene::new(text, keywords))
        })
        .collect();

    if scenes.is_empty() {
        None
    } else {
        Some(scenes)
    }
}

fn scene_prompt(script: &str) -> String {
    format!(
        r#"You are a video storyboard assistant. Segment the narration script below into at most 6 scenes.

For each scene provide:
- "text": one sentence of narration taken from the script
- "keywords": up to 5 lowercase words for stock footage search, joined by single spaces

IMPORTANT: You must strictly follow this output format.
Return ONLY a single JSON object with this schema:
{{
  "scenes": [
    {{ "text": "narration sentence", "keywords": "word1 word2 word3" }}
  ]
}}

SCRIPT:
{script}"#
    )
}

fn idea_prompt(idea: &str) -> String {
    format!(
        r#"You are a short-form video scriptwriter. Write a narration script for a faceless video about the idea below.

Structure it as four short paragraphs: a hook, the problem, the solution, and a call to action.
Return ONLY the narration text. No headings, no markdown, no stage directions.

IDEA:
{idea}"#
    )
}

fn article_prompt(article: &str) -> String {
    format!(
        r#"You are a short-form video scriptwriter. Summarize the article excerpt below into a narration script for a faceless video.

Open with a hook, cover the two strongest insights, and close with the takeaway.
Return ONLY the narration text. No headings, no markdown, no stage directions.

ARTICLE:
{article}"#
    )
}
