//! Job status polling
//!
//! - [`BackoffPolicy`] computes the wait between status rounds
//! - [`PollOrchestrator`] runs the round loop and yields a [`PollReport`]

mod backoff;
mod orchestrator;

pub use backoff::{Backoff, BackoffPolicy};
pub use orchestrator::{PollOrchestrator, PollPolicy, PollReport, PollState, Transition, transition};
