//! Shared data models for the Faceless AI backend.
//!
//! This crate provides Serde-serializable types for:
//! - Generation jobs and their lifecycle
//! - Input modes and validation limits
//! - Scenes and title derivation

pub mod job;
pub mod mode;
pub mod scene;

// Re-export common types
pub use job::{derive_title, Job, JobId, JobStatus, JobSummary};
pub use mode::{validate_input, InputError, Mode, ASPECT_PRESETS, VOICE_PRESETS};
pub use scene::Scene;
