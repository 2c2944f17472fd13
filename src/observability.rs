//! Observability: tracing subscriber setup and search counters

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Filter used before the configured one is known
const BOOTSTRAP_FILTER: &str = "info";

/// `RUST_LOG` if set and valid, otherwise `default_filter`
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_FILTER))
}

fn fmt_subscriber<W>(filter: EnvFilter, make_writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer)
        .finish()
}

/// Install the global `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this twice is
/// harmless; the second installation is ignored.
pub fn init_tracing(default_filter: &str) {
    let subscriber = fmt_subscriber(env_filter(default_filter), std::io::stderr);
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Run `f` with a temporary stderr subscriber.
///
/// Configuration is loaded before the global subscriber exists; this keeps
/// its events (which file was read, missing file warnings) visible.
pub fn with_bootstrap_tracing<T>(f: impl FnOnce() -> T) -> T {
    let subscriber = fmt_subscriber(env_filter(BOOTSTRAP_FILTER), std::io::stderr);
    tracing::subscriber::with_default(subscriber, f)
}

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    searches_started: AtomicU64,
    searches_succeeded: AtomicU64,
    searches_failed: AtomicU64,
    status_polls: AtomicU64,
    stale_runs_discarded: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_started(&self) {
        self.searches_started.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "searches_started", "Metric incremented");
    }

    pub fn search_succeeded(&self) {
        self.searches_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "searches_succeeded", "Metric incremented");
    }

    pub fn search_failed(&self) {
        self.searches_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "searches_failed", "Metric incremented");
    }

    pub fn status_polled(&self) {
        self.status_polls.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "status_polls", "Metric incremented");
    }

    pub fn stale_run_discarded(&self) {
        self.stale_runs_discarded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "stale_runs_discarded", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            searches_started: self.searches_started.load(Ordering::Relaxed),
            searches_succeeded: self.searches_succeeded.load(Ordering::Relaxed),
            searches_failed: self.searches_failed.load(Ordering::Relaxed),
            status_polls: self.status_polls.load(Ordering::Relaxed),
            stale_runs_discarded: self.stale_runs_discarded.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub searches_started: u64,
    pub searches_succeeded: u64,
    pub searches_failed: u64,
    pub status_polls: u64,
    pub stale_runs_discarded: u64,
}
