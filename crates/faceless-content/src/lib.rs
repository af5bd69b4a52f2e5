//! Script and scene generation for the Faceless AI pipeline.
//!
//! Two layers:
//! - [`fallback`]: deterministic text heuristics that always produce usable
//!   output, with no external dependencies.
//! - [`ContentEngine`]: tries the Gemini API when a credential is configured
//!   and silently degrades to the fallback layer on any failure. Its
//!   operations never return an error; callers can rely on getting content.

pub mod engine;
pub mod fallback;
pub mod gemini;

pub use engine::ContentEngine;
pub use gemini::{ContentError, GeminiClient};
