//! Search controller: the entry point presentation layers call.
//!
//! A search validates the form input, submits a job, hands it to the
//! [`PollOrchestrator`], and publishes the result into [`SearchState`].
//! Every search is tagged with a generation number; a run whose generation
//! is no longer current when it finishes is dropped instead of published,
//! so an older run can never overwrite a newer one.

mod state;
mod validation;

pub use state::{SearchOutcome, SearchState};
pub use validation::validate_search;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::{ClientError, DownloadKind, DownloadedFile, HttpConfig, HttpJobClient, JobClient};
use crate::config::Config;
use crate::error::SearchError;
use crate::normalize::ChannelView;
use crate::observability::Metrics;
use crate::poll::{PollOrchestrator, PollPolicy};

pub struct SearchController {
    client: Arc<dyn JobClient>,
    orchestrator: PollOrchestrator,
    state: RwLock<SearchState>,
    generation: AtomicU64,
    metrics: Arc<Metrics>,
}

impl SearchController {
    pub fn new(client: Arc<dyn JobClient>, policy: PollPolicy) -> Self {
        Self::with_metrics(client, policy, Arc::new(Metrics::new()))
    }

    pub fn with_metrics(
        client: Arc<dyn JobClient>,
        policy: PollPolicy,
        metrics: Arc<Metrics>,
    ) -> Self {
        let orchestrator = PollOrchestrator::new(client.clone(), policy, metrics.clone());
        Self {
            client,
            orchestrator,
            state: RwLock::new(SearchState::default()),
            generation: AtomicU64::new(0),
            metrics,
        }
    }

    /// Build a controller talking HTTP to the configured scraping API
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let client = HttpJobClient::new(HttpConfig::from(&config.api))?;
        Ok(Self::new(
            Arc::new(client),
            PollPolicy::from(&config.polling),
        ))
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Snapshot of the published state
    pub async fn state(&self) -> SearchState {
        self.state.read().await.clone()
    }

    /// Run one search to its terminal outcome.
    ///
    /// The outcome is always returned to the caller; it is published to the
    /// state only if no newer search started in the meantime.
    pub async fn start_search(&self, query: &str, max_channels_text: &str) -> SearchOutcome {
        self.metrics.search_started();
        let generation = {
            // Generation and `begin` change together under the write guard
            let mut state = self.state.write().await;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.begin(query, max_channels_text);
            generation
        };

        info!(generation, query, max_channels = max_channels_text, "Search started");

        let (job_id, result) = self.run(query, max_channels_text).await;
        let outcome = SearchOutcome::from(result.clone());

        self.publish(generation, job_id, result).await;

        outcome
    }

    async fn run(
        &self,
        query: &str,
        max_channels_text: &str,
    ) -> (Option<String>, Result<Vec<ChannelView>, SearchError>) {
        let request = match validate_search(query, max_channels_text) {
            Ok(request) => request,
            Err(e) => return (None, Err(e)),
        };

        let job_id = match self.client.submit(&request).await {
            Ok(job_id) => job_id,
            Err(e) => return (None, Err(e.into())),
        };

        info!(job_id = %job_id, "Scrape job submitted");

        let report = self.orchestrator.drive(&job_id).await;
        debug!(job_id = %job_id, state = ?report.state, rounds = report.rounds, "Polling finished");

        (Some(job_id), report.result)
    }

    async fn publish(
        &self,
        generation: u64,
        job_id: Option<String>,
        result: Result<Vec<ChannelView>, SearchError>,
    ) -> bool {
        let mut state = self.state.write().await;

        let current = self.generation.load(Ordering::SeqCst);
        if current != generation {
            self.metrics.stale_run_discarded();
            debug!(generation, current, "Discarding result of superseded search");
            return false;
        }

        match &result {
            Ok(_) => self.metrics.search_succeeded(),
            Err(e) => {
                self.metrics.search_failed();
                warn!(generation, code = e.code(), error = %e, "Search failed");
            }
        }

        state.publish(job_id, result);
        true
    }

    /// Change the selected channel; unknown ids leave the selection untouched
    pub async fn select_channel(&self, id: &str) -> bool {
        self.state.write().await.select(id)
    }

    /// Fetch a CSV export of the current results.
    ///
    /// Returns `Ok(None)` when there is nothing to download. A failed
    /// download is also published as the state error; results stay intact.
    pub async fn download(&self, kind: DownloadKind) -> Result<Option<DownloadedFile>, SearchError> {
        let job_id = {
            let state = self.state.read().await;
            if state.results.is_empty() {
                return Ok(None);
            }
            match state.job_id.clone() {
                Some(job_id) => job_id,
                None => return Ok(None),
            }
        };

        match self.client.download(&job_id, kind).await {
            Ok(file) => {
                info!(job_id = %job_id, kind = %kind, size = file.bytes.len(), "Export downloaded");
                Ok(Some(file))
            }
            Err(e) => {
                warn!(job_id = %job_id, kind = %kind, error = %e, "Export download failed");
                let err = SearchError::Download(e.to_string());

                let mut state = self.state.write().await;
                if state.job_id.as_deref() == Some(job_id.as_str()) {
                    state.error = Some(err.clone());
                }
                Err(err)
            }
        }
    }
}
