//! Polling client for the Faceless AI generation API.
//!
//! Mirrors the dashboard's behavior: validate locally, submit, then poll
//! the status endpoint on a fixed interval until the job settles. One
//! status request is in flight at a time, and polling stops on the first
//! terminal status, on any transport error, or on cancellation.

pub mod api;
pub mod poller;

pub use api::{ApiClient, ClientError, GenerateRequest, StatusPayload};
pub use poller::{JobPoller, Phase, Settled};
