//! HTTP request handlers.

pub mod generation;
pub mod health;
pub mod jobs;

pub use generation::{get_video_status, submit_job};
pub use health::health;
pub use jobs::list_recent_jobs;
