//! Deterministic fallback content generators.
//!
//! These are the pipeline's safety net: pure, total functions that turn a
//! script into scenes or an idea/article into a narration script without
//! calling any external service. [`scenes_from_script`] returns a non-empty
//! sequence for every input, including the empty string.

use faceless_models::Scene;

/// Maximum number of scenes in a breakdown.
const MAX_SCENES: usize = 6;

/// Maximum number of keyword tokens per scene.
const MAX_KEYWORDS: usize = 5;

/// Split a script into up to six scenes with keyword token lists.
///
/// Sentences are cut on terminating punctuation or newlines. Each kept
/// sentence yields up to five lowercase word tokens as keywords; a sentence
/// with no usable tokens gets a synthetic `scene N` label instead.
pub fn scenes_from_script(script: &str) -> Vec<Scene> {
    if script.trim().is_empty() {
        return vec![Scene::new(
            "Welcome to your new faceless video.",
            "welcome faceless video",
        )];
    }

    script
        .split(['.', '!', '?', '\n'])
        .filter_map(|fragment| {
            let text = fragment.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        })
        .take(MAX_SCENES)
        .enumerate()
        .map(|(index, text)| {
            let keywords = keyword_tokens(&text)
                .unwrap_or_else(|| format!("scene {}", index + 1));
            Scene::new(text, keywords)
        })
        .collect()
}

/// Expand an idea into a four-paragraph hook/problem/solution/CTA script.
///
/// Returns an empty string for empty input; submission validation rejects
/// that case before this is ever invoked.
pub fn script_from_idea(idea: &str) -> String {
    let idea = idea.trim();
    if idea.is_empty() {
        return String::new();
    }

    [
        format!("Have you ever wondered about {idea}? You're not alone, and the answer might surprise you."),
        format!("Most people struggle with {idea} because they never get a clear, practical starting point."),
        format!("Here's the good news: {idea} becomes much simpler once you break it into small, repeatable steps."),
        format!("If you're ready to make {idea} work for you, stick around and share this with someone who needs it."),
    ]
    .join("\n\n")
}

/// Summarize an article into a hook, two insights, and a takeaway.
///
/// The first sentence becomes the hook; sentences two to four supply the
/// insights and the takeaway, with generic filler standing in when the
/// article is too short. Empty input yields an empty string, mirroring
/// [`script_from_idea`].
pub fn script_from_article(article: &str) -> String {
    if article.trim().is_empty() {
        return String::new();
    }

    let sentences: Vec<String> = article
        .split(['.', '!', '?', '\n'])
        .filter_map(|fragment| {
            let text = fragment.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        })
        .take(4)
        .collect();

    let hook = sentences
        .first()
        .map(String::as_str)
        .unwrap_or("This story deserves a closer look");
    let first_insight = sentences
        .get(1)
        .map(String::as_str)
        .unwrap_or("the details matter more than the headline suggests");
    let second_insight = sentences
        .get(2)
        .map(String::as_str)
        .unwrap_or("small shifts in context change the whole picture");
    let takeaway = sentences
        .get(3)
        .map(String::as_str)
        .unwrap_or("keep watching this space, because the story is still developing");

    format!(
        "{hook}.\n\nOne insight stands out: {first_insight}.\n\nThere's more beneath the surface: {second_insight}.\n\nThe takeaway: {takeaway}."
    )
}

/// Up to five lowercase alphanumeric tokens, space-joined.
fn keyword_tokens(text: &str) -> Option<String> {
    let tokens: Vec<String> = text
        .split_whitespace()
        .filter_map(|word| {
            let token: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if token.is_empty() {
                None
            } else {
                Some(token)
            }
        })
        .take(MAX_KEYWORDS)
        .collect();

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenes_never_empty() {
        assert!(!scenes_from_script("").is_empty());
        assert!(!scenes_from_script("   \n  ").is_empty());
        assert!(!scenes_from_script("One sentence.").is_empty());
    }

    #[test]
    fn test_scene_split_and_keywords() {
        let scenes = scenes_from_script(
            "A lion roams the savanna at sunrise. It hunts for food. It returns to its pride.",
        );
        assert_eq!(scenes.len(), 3);
        assert_eq!(scenes[0].text, "A lion roams the savanna at sunrise");
        assert_eq!(scenes[0].keywords, "a lion roams the savanna");
        assert_eq!(scenes[1].keywords, "it hunts for food");
        assert_eq!(scenes[2].keywords, "it returns to its pride");
    }

    #[test]
    fn test_scene_cap_at_six() {
        let script = "One. Two. Three. Four. Five. Six. Seven. Eight.";
        assert_eq!(scenes_from_script(script).len(), 6);
    }

    #[test]
    fn test_newlines_split_scenes() {
        let scenes = scenes_from_script("First line\nSecond line");
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[1].text, "Second line");
    }

    #[test]
    fn test_synthetic_label_when_no_tokens() {
        let scenes = scenes_from_script("...! — ­– ,,, valid words here.");
        // The punctuation-only fragments are dropped entirely; a fragment
        // made of symbols that survive splitting gets the synthetic label.
        let scenes2 = scenes_from_script("© ® ™");
        assert_eq!(scenes2.len(), 1);
        assert_eq!(scenes2[0].keywords, "scene 1");
        assert!(scenes.iter().all(|s| !s.keywords.is_empty()));
    }

    #[test]
    fn test_keywords_are_lowercase_and_capped() {
        let scenes = scenes_from_script("The Quick Brown Fox Jumps Over The Lazy Dog.");
        assert_eq!(scenes[0].keywords, "the quick brown fox jumps");
        assert_eq!(scenes[0].keywords, scenes[0].keywords.to_lowercase());
    }

    #[test]
    fn test_idea_template_has_four_paragraphs() {
        let script = script_from_idea("remote team building");
        let paragraphs: Vec<&str> = script.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 4);
        for paragraph in paragraphs {
            assert!(paragraph.contains("remote team building"));
        }
    }

    #[test]
    fn test_idea_empty_input_returns_empty() {
        assert_eq!(script_from_idea("   "), "");
    }

    #[test]
    fn test_article_uses_first_four_sentences() {
        let script = script_from_article(
            "Remote work rose 30% last year. Companies cut office space. Workers report higher focus. Hybrid is here to stay.",
        );
        assert!(script.starts_with("Remote work rose 30% last year."));
        assert!(script.contains("Companies cut office space"));
        assert!(script.contains("Workers report higher focus"));
        assert!(script.contains("The takeaway: Hybrid is here to stay."));
    }

    #[test]
    fn test_article_filler_when_short() {
        let script = script_from_article("A single headline sentence.");
        assert!(script.starts_with("A single headline sentence."));
        assert!(script.contains("the details matter more than the headline suggests"));
        assert!(script.contains("keep watching this space"));
    }

    #[test]
    fn test_article_empty_input_returns_empty() {
        assert_eq!(script_from_article(""), "");
    }

    #[test]
    fn test_determinism() {
        let input = "A lion roams. It hunts.";
        assert_eq!(scenes_from_script(input), scenes_from_script(input));
        assert_eq!(script_from_idea("x y z"), script_from_idea("x y z"));
    }
}
