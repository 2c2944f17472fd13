//! Backoff policy: decides how long to wait between status polls.

use rand::Rng;
use std::time::Duration;

use crate::config::PollingConfig;

/// Wait computed for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Grown delay, capped at the policy's `max_delay`
    pub delay: Duration,
    /// Random extra wait in `[0, max_jitter)`; never part of the cap calculation
    pub jitter: Duration,
}

impl Backoff {
    /// Time to actually sleep
    pub fn total(&self) -> Duration {
        self.delay + self.jitter
    }
}

/// Multiplicative backoff with a ceiling and additive jitter.
///
/// With the defaults the delays run 1s, 1.5s, 2.25s, 3.375s, 5.0625s,
/// 7.59375s and then stay at 10s.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// Delay used for the first wait
    pub initial_delay: Duration,

    /// Growth factor applied to the previous delay
    pub multiplier: f64,

    /// Ceiling for the grown delay
    pub max_delay: Duration,

    /// Exclusive upper bound for jitter
    pub max_jitter: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            multiplier: 1.5,
            max_delay: Duration::from_millis(10_000),
            max_jitter: Duration::from_millis(1000),
        }
    }
}

impl From<&PollingConfig> for BackoffPolicy {
    fn from(config: &PollingConfig) -> Self {
        Self {
            initial_delay: config.initial_delay.as_duration(),
            multiplier: config.multiplier,
            max_delay: config.max_delay.as_duration(),
            max_jitter: config.max_jitter.as_duration(),
        }
    }
}

impl BackoffPolicy {
    /// Compute the wait after `attempt` (0-indexed) given the previous delay.
    ///
    /// Attempt 0 yields `initial_delay`; later attempts yield
    /// `min(previous * multiplier, max_delay)`. The only input besides the
    /// arguments is `rng`, which draws the jitter.
    pub fn next<R: Rng + ?Sized>(&self, attempt: u32, previous: Duration, rng: &mut R) -> Backoff {
        let delay = if attempt == 0 {
            self.initial_delay.min(self.max_delay)
        } else {
            Duration::try_from_secs_f64(previous.as_secs_f64() * self.multiplier)
                .unwrap_or(self.max_delay)
                .min(self.max_delay)
        };

        Backoff {
            delay,
            jitter: self.jitter(rng),
        }
    }

    fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let bound = self.max_jitter.as_micros() as u64;
        if bound == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(rng.gen_range(0..bound))
    }
}
