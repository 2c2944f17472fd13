//! Poll orchestrator: drives one submitted job to a terminal state.
//!
//! Each round fetches the job status, applies [`transition`], and either
//! terminates or sleeps for the backoff before the next round. The loop
//! suspends only at that sleep. Exactly one [`PollReport`] is produced
//! per run.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::backoff::BackoffPolicy;
use crate::api::{JobClient, JobSnapshot, JobStatus};
use crate::config::PollingConfig;
use crate::error::{JOB_FAILED_FALLBACK, SearchError};
use crate::normalize::{ChannelView, normalize_all};
use crate::observability::Metrics;

/// Orchestration states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Queued,
    Processing,
    Completed,
    Failed,
    /// Attempt ceiling reached
    Exhausted,
    /// Transport or payload fault
    Errored,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Queued | PollState::Processing)
    }
}

/// Polling limits
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    pub backoff: BackoffPolicy,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            backoff: BackoffPolicy::default(),
            max_attempts: 30,
        }
    }
}

impl From<&PollingConfig> for PollPolicy {
    fn from(config: &PollingConfig) -> Self {
        Self {
            backoff: BackoffPolicy::from(config),
            max_attempts: config.max_attempts,
        }
    }
}

/// Terminal result of one orchestration run
#[derive(Debug, Clone, PartialEq)]
pub struct PollReport {
    pub job_id: String,
    pub state: PollState,
    /// Status rounds performed, including the terminal one
    pub rounds: u32,
    pub result: Result<Vec<ChannelView>, SearchError>,
}

/// Outcome of applying one status update
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Stay(PollState),
    Terminate(PollState, Result<Vec<ChannelView>, SearchError>),
}

/// Apply one round's status update to the current state.
///
/// `None` means the server had no update this round.
pub fn transition(current: PollState, update: Option<JobSnapshot>) -> Transition {
    let Some(snapshot) = update else {
        return Transition::Stay(current);
    };

    match snapshot.status {
        JobStatus::Queued => Transition::Stay(PollState::Queued),
        JobStatus::Processing => Transition::Stay(PollState::Processing),
        JobStatus::Completed => {
            let raws = snapshot.channel_details.as_deref().unwrap_or_default();
            match normalize_all(raws) {
                Ok(views) => Transition::Terminate(PollState::Completed, Ok(views)),
                Err(e) => Transition::Terminate(PollState::Errored, Err(e.into())),
            }
        }
        JobStatus::Failed => {
            let reason = snapshot
                .error
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| JOB_FAILED_FALLBACK.to_string());
            Transition::Terminate(PollState::Failed, Err(SearchError::JobFailed(reason)))
        }
        JobStatus::Other(raw) => {
            warn!(status = %raw, "Ignoring unknown job status");
            Transition::Stay(current)
        }
    }
}

/// Owns the retry loop for submitted jobs
pub struct PollOrchestrator {
    client: Arc<dyn JobClient>,
    policy: PollPolicy,
    metrics: Arc<Metrics>,
}

impl PollOrchestrator {
    pub fn new(client: Arc<dyn JobClient>, policy: PollPolicy, metrics: Arc<Metrics>) -> Self {
        Self {
            client,
            policy,
            metrics,
        }
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Poll `job_id` until it completes, fails, errors, or the attempt ceiling is hit
    pub async fn drive(&self, job_id: &str) -> PollReport {
        let mut rng = StdRng::from_entropy();
        let mut state = PollState::Queued;
        let mut previous = Duration::ZERO;
        let mut round: u32 = 0;

        loop {
            round += 1;
            self.metrics.status_polled();

            let update = match self.client.fetch_status(job_id).await {
                Ok(update) => update,
                Err(e) => {
                    warn!(job_id, round, error = %e, "Status fetch failed");
                    return self.report(job_id, PollState::Errored, round, Err(e.into()));
                }
            };

            match transition(state, update) {
                Transition::Stay(next) => {
                    if next != state {
                        debug!(job_id, round, from = ?state, to = ?next, "Job state changed");
                    }
                    state = next;
                }
                Transition::Terminate(terminal, result) => {
                    return self.report(job_id, terminal, round, result);
                }
            }

            if round >= self.policy.max_attempts {
                return self.report(
                    job_id,
                    PollState::Exhausted,
                    round,
                    Err(SearchError::Timeout { attempts: round }),
                );
            }

            let backoff = self.policy.backoff.next(round - 1, previous, &mut rng);
            previous = backoff.delay;

            debug!(
                job_id,
                round,
                state = ?state,
                delay_ms = backoff.delay.as_millis() as u64,
                jitter_ms = backoff.jitter.as_millis() as u64,
                "Waiting before next status poll"
            );
            tokio::time::sleep(backoff.total()).await;
        }
    }

    fn report(
        &self,
        job_id: &str,
        state: PollState,
        rounds: u32,
        result: Result<Vec<ChannelView>, SearchError>,
    ) -> PollReport {
        match &result {
            Ok(views) => info!(job_id, rounds, channels = views.len(), "Job completed"),
            Err(e) => warn!(job_id, rounds, state = ?state, error = %e, "Job did not complete"),
        }

        PollReport {
            job_id: job_id.to_string(),
            state,
            rounds,
            result,
        }
    }
}
