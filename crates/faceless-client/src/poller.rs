//! The job poller: submit, then watch one in-flight generation to its end.
//!
//! State machine: `idle -> submitting -> polling -> settled`. Polling uses a
//! single timer with one outstanding status request at a time; a new poll is
//! never issued before the previous one's handling completes. The timer
//! stops on a terminal status, on the first transport error (no retry — a
//! transient blip ends the attempt), or when the caller tears the poller
//! down via the shutdown future.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use faceless_models::{validate_input, JobStatus, Scene};

use crate::api::{ApiClient, ClientError, GenerateRequest};

/// Message shown when polling dies on a network or parse error.
const CONNECTIVITY_FAILURE: &str = "We lost connection to the renderer. Please try again.";

/// Message shown when the server reports failure without a message.
const GENERIC_FAILURE: &str = "Video generation failed. Please try again.";

/// Default polling cadence.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Client-observed lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Polling,
    SettledSuccess,
    SettledFailure,
}

/// Final outcome of one generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    Success {
        video_url: String,
        scenes: Vec<Scene>,
        title: String,
    },
    Failure {
        message: String,
    },
    /// Torn down before the job settled. The server keeps working; the
    /// client has just abandoned interest.
    Cancelled,
}

/// Drives one generation attempt from submission to a settled outcome.
pub struct JobPoller {
    client: ApiClient,
    interval: Duration,
    phase_tx: watch::Sender<Phase>,
}

impl JobPoller {
    pub fn new(client: ApiClient) -> Self {
        let (phase_tx, _) = watch::channel(Phase::Idle);
        Self {
            client,
            interval: DEFAULT_POLL_INTERVAL,
            phase_tx,
        }
    }

    /// Override the polling cadence.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Observe phase transitions.
    pub fn phases(&self) -> watch::Receiver<Phase> {
        self.phase_tx.subscribe()
    }

    /// Run an attempt to completion.
    pub async fn run(&self, request: &GenerateRequest) -> Settled {
        self.run_with_shutdown(request, std::future::pending::<()>())
            .await
    }

    /// Run an attempt, stopping early when `shutdown` resolves.
    ///
    /// Starting a new attempt resets any prior settled phase, matching the
    /// dashboard's clear-on-mode-switch behavior.
    pub async fn run_with_shutdown(
        &self,
        request: &GenerateRequest,
        shutdown: impl Future<Output = ()>,
    ) -> Settled {
        tokio::pin!(shutdown);

        self.set_phase(Phase::Idle);

        // Fail fast locally; mirrors the server-side checks, no request made.
        if let Err(e) = validate_input(request.mode, &request.text) {
            return self.settle_failure(e.to_string());
        }

        self.set_phase(Phase::Submitting);
        let job_id = tokio::select! {
            () = &mut shutdown => return self.cancel(),
            result = self.client.submit(request) => match result {
                Ok(id) => id,
                Err(e) => return self.settle_failure(submit_failure_message(e)),
            },
        };

        debug!(job_id = %job_id, "Submitted; polling for status");
        self.set_phase(Phase::Polling);

        loop {
            tokio::select! {
                () = &mut shutdown => return self.cancel(),
                () = tokio::time::sleep(self.interval) => {}
            }

            let payload = tokio::select! {
                () = &mut shutdown => return self.cancel(),
                result = self.client.status(&job_id) => match result {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(job_id = %job_id, error = %e, "Status poll failed; giving up");
                        return self.settle_failure(CONNECTIVITY_FAILURE.to_string());
                    }
                },
            };

            match payload.status {
                JobStatus::Complete => {
                    self.set_phase(Phase::SettledSuccess);
                    return Settled::Success {
                        video_url: payload.video_url.unwrap_or_default(),
                        scenes: payload.scenes,
                        title: payload.title,
                    };
                }
                JobStatus::Failed => {
                    return self.settle_failure(
                        payload.error.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
                    );
                }
                JobStatus::Pending | JobStatus::Processing => {
                    debug!(job_id = %job_id, status = %payload.status, "Still generating");
                }
            }
        }
    }

    fn settle_failure(&self, message: String) -> Settled {
        self.set_phase(Phase::SettledFailure);
        Settled::Failure { message }
    }

    fn cancel(&self) -> Settled {
        self.set_phase(Phase::Idle);
        Settled::Cancelled
    }

    fn set_phase(&self, phase: Phase) {
        // send_replace updates the stored value even when no receiver is
        // subscribed yet, so a late phases() call still sees where the run
        // ended up.
        self.phase_tx.send_replace(phase);
    }
}

fn submit_failure_message(error: ClientError) -> String {
    match error {
        ClientError::Rejected(message) => message,
        ClientError::Transport(_) | ClientError::NotFound | ClientError::Malformed => {
            "Unable to start video generation. Please try again.".to_string()
        }
    }
}
