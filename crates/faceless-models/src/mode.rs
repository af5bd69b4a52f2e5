//! Input modes and submission validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How the submitted text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A finished narration script, rendered as-is
    #[default]
    Script,
    /// A topic prompt expanded into a script
    Idea,
    /// Article text summarized into a script
    Article,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Script => "script",
            Mode::Idea => "idea",
            Mode::Article => "article",
        }
    }

    /// Parse a mode label, treating anything unrecognized as `script`.
    pub fn parse_lenient(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "idea" => Mode::Idea,
            "article" => Mode::Article,
            _ => Mode::Script,
        }
    }

    /// Minimum input length after trimming.
    pub fn min_len(&self) -> usize {
        match self {
            Mode::Script => 30,
            Mode::Idea | Mode::Article => 8,
        }
    }

    /// Maximum input length after trimming.
    pub fn max_len(&self) -> usize {
        match self {
            Mode::Script => 1500,
            Mode::Idea => 320,
            Mode::Article => 2200,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Voice presets offered by the composer. Echoed back unmodified.
pub const VOICE_PRESETS: [&str; 4] = ["professional", "casual", "energetic", "storyteller"];

/// Aspect ratio presets offered by the composer. Echoed back unmodified.
pub const ASPECT_PRESETS: [&str; 4] = ["16:9", "9:16", "1:1", "4:5"];

/// Why a submission was rejected before a job was created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Add some content before generating a video.")]
    Empty,
    #[error("Your script is a bit short. Add more context so we can storyboard it.")]
    ScriptTooShort,
    #[error("Share a few more words so we can understand your prompt.")]
    PromptTooShort,
    #[error("{mode} input is limited to {max} characters.")]
    TooLong { mode: Mode, max: usize },
}

/// Validate the mode-appropriate input text, returning the trimmed value.
///
/// The same checks run in the browser-equivalent client and on the server,
/// so a request that passes locally is accepted remotely.
pub fn validate_input(mode: Mode, text: &str) -> Result<&str, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    if trimmed.chars().count() < mode.min_len() {
        return Err(match mode {
            Mode::Script => InputError::ScriptTooShort,
            Mode::Idea | Mode::Article => InputError::PromptTooShort,
        });
    }
    if trimmed.chars().count() > mode.max_len() {
        return Err(InputError::TooLong {
            mode,
            max: mode.max_len(),
        });
    }
    Ok(trimmed)
}
