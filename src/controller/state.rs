use chrono::{DateTime, Utc};

use crate::error::SearchError;
use crate::normalize::ChannelView;

/// Terminal value of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Success(Vec<ChannelView>),
    Failure(String),
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success(_))
    }

    pub fn channels(&self) -> &[ChannelView] {
        match self {
            SearchOutcome::Success(channels) => channels,
            SearchOutcome::Failure(_) => &[],
        }
    }
}

impl From<Result<Vec<ChannelView>, SearchError>> for SearchOutcome {
    fn from(value: Result<Vec<ChannelView>, SearchError>) -> Self {
        match value {
            Ok(channels) => SearchOutcome::Success(channels),
            Err(e) => SearchOutcome::Failure(e.to_string()),
        }
    }
}

/// Observable state published by the search controller
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Query text of the latest search
    pub query: String,
    /// Channel limit text of the latest search, as typed
    pub max_channels: String,
    pub loading: bool,
    pub results: Vec<ChannelView>,
    pub selected: Option<ChannelView>,
    pub error: Option<SearchError>,
    pub outcome: Option<SearchOutcome>,
    /// Job behind the current results; used for downloads
    pub job_id: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SearchState {
    /// Reset for a new search
    pub(crate) fn begin(&mut self, query: &str, max_channels: &str) {
        *self = SearchState {
            query: query.to_string(),
            max_channels: max_channels.to_string(),
            loading: true,
            ..SearchState::default()
        };
    }

    /// Record the terminal result of the current search
    pub(crate) fn publish(
        &mut self,
        job_id: Option<String>,
        result: Result<Vec<ChannelView>, SearchError>,
    ) {
        self.outcome = Some(SearchOutcome::from(result.clone()));
        match result {
            Ok(channels) => {
                self.selected = channels.first().cloned();
                self.results = channels;
                self.error = None;
                self.job_id = job_id;
            }
            Err(e) => {
                self.results.clear();
                self.selected = None;
                self.error = Some(e);
                self.job_id = None;
            }
        }
        self.loading = false;
        self.completed_at = Some(Utc::now());
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Select the channel with `id` if it is part of the results
    pub(crate) fn select(&mut self, id: &str) -> bool {
        match self.results.iter().find(|channel| channel.id == id) {
            Some(channel) => {
                self.selected = Some(channel.clone());
                true
            }
            None => false,
        }
    }
}
