//! Provider adapter behavior against a mock Gemini endpoint.
//!
//! Exercises the silent-fallback contract: whatever the provider does,
//! the engine resolves to usable content.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use faceless_content::{fallback, ContentEngine, GeminiClient};

const LION_SCRIPT: &str =
    "A lion roams the savanna at sunrise. It hunts for food. It returns to its pride.";

fn gemini_body(inner_text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": inner_text } ] } }
        ]
    })
}

async fn engine_for(server: &MockServer) -> ContentEngine {
    let client = GeminiClient::new("test-key").with_base_url(server.uri());
    ContentEngine::with_client(client)
}

#[tokio::test]
async fn uses_model_scenes_when_response_is_valid() {
    let server = MockServer::start().await;
    let plan = r#"{"scenes":[{"text":"Dawn breaks over the savanna","keywords":"dawn savanna golden light"}]}"#;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(plan)))
        .mount(&server)
        .await;

    let engine = engine_for(&server).await;
    let scenes = engine.scenes_for_script(LION_SCRIPT).await;

    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].text, "Dawn breaks over the savanna");
    assert_eq!(scenes[0].keywords, "dawn savanna golden light");
}

#[tokio::test]
async fn strips_code_fences_around_json() {
    let server = MockServer::start().await;
    let fenced = "```json\n{\"scenes\":[{\"text\":\"A lion hunts\",\"keywords\":\"lion hunt\"}]}\n```";

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(fenced)))
        .mount(&server)
        .await;

    let engine = engine_for(&server).await;
    let scenes = engine.scenes_for_script(LION_SCRIPT).await;

    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].text, "A lion hunts");
}

#[tokio::test]
async fn malformed_response_falls_back_silently() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("this is not json")))
        .mount(&server)
        .await;

    let engine = engine_for(&server).await;
    let scenes = engine.scenes_for_script(LION_SCRIPT).await;

    assert_eq!(scenes, fallback::scenes_from_script(LION_SCRIPT));
}

#[tokio::test]
async fn empty_scene_list_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(r#"{"scenes":[]}"#)))
        .mount(&server)
        .await;

    let engine = engine_for(&server).await;
    let scenes = engine.scenes_for_script(LION_SCRIPT).await;

    assert_eq!(scenes, fallback::scenes_from_script(LION_SCRIPT));
}

#[tokio::test]
async fn provider_errors_fall_back_for_every_operation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let engine = engine_for(&server).await;

    assert_eq!(
        engine.scenes_for_script(LION_SCRIPT).await,
        fallback::scenes_from_script(LION_SCRIPT)
    );
    assert_eq!(
        engine.script_from_idea("remote team building").await,
        fallback::script_from_idea("remote team building")
    );
    assert_eq!(
        engine.script_from_article("One. Two. Three. Four.").await,
        fallback::script_from_article("One. Two. Three. Four.")
    );
}

#[tokio::test]
async fn cascades_to_next_model_on_failure() {
    let server = MockServer::start().await;
    let plan = r#"{"scenes":[{"text":"Backup model scene","keywords":"backup scene"}]}"#;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-lite:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(plan)))
        .mount(&server)
        .await;

    let engine = engine_for(&server).await;
    let scenes = engine.scenes_for_script(LION_SCRIPT).await;

    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].text, "Backup model scene");
}

#[tokio::test]
async fn plain_text_script_generation_uses_model_output() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_body("  A crisp narration about remote work.  ")),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server).await;
    let script = engine.script_from_idea("remote team building").await;

    assert_eq!(script, "A crisp narration about remote work.");
}
