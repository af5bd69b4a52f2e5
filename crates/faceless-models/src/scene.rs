//! Scene segments of a generated video.

use serde::{Deserialize, Serialize};

/// One segment of the narrated video.
///
/// `keywords` is a lowercase space-joined token list used for stock footage
/// lookup downstream; it is derived from the scene text and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub text: String,
    pub keywords: String,
}

impl Scene {
    pub fn new(text: impl Into<String>, keywords: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keywords: keywords.into(),
        }
    }
}
