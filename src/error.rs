//! Errors recovered at the search controller boundary.
//!
//! Every variant's `Display` output is the message shown to the user.

use thiserror::Error;

use crate::api::ClientError;
use crate::normalize::MalformedDataError;

pub const INVALID_MAX_CHANNELS: &str = "Please enter a valid number of channels";
pub const EMPTY_QUERY: &str = "Please enter a search query";
pub const JOB_FAILED_FALLBACK: &str = "Job failed";
pub const DOWNLOAD_FAILED: &str = "Failed to download CSV. Please try again.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Bad user input, caught before any network call
    #[error("{0}")]
    Validation(String),

    /// Job creation rejected by the server
    #[error("{0}")]
    Submission(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Server reported the job as failed
    #[error("{0}")]
    JobFailed(String),

    #[error("Scraping timed out. Please try again.")]
    Timeout { attempts: u32 },

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Failed to download CSV. Please try again.")]
    Download(String),
}

impl SearchError {
    /// Short machine-readable name of the error class
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::Validation(_) => "VALIDATION",
            SearchError::Submission(_) => "SUBMISSION",
            SearchError::Network(_) => "NETWORK",
            SearchError::JobFailed(_) => "JOB_FAILED",
            SearchError::Timeout { .. } => "TIMEOUT",
            SearchError::MalformedData(_) => "MALFORMED_DATA",
            SearchError::Download(_) => "DOWNLOAD",
        }
    }
}

impl From<ClientError> for SearchError {
    fn from(value: ClientError) -> Self {
        match value {
            ClientError::Submission(detail) => SearchError::Submission(detail),
            ClientError::Network(_) | ClientError::Timeout => {
                SearchError::Network(value.to_string())
            }
            ClientError::Decode(detail) => SearchError::MalformedData(detail),
            ClientError::Download { .. } => SearchError::Download(value.to_string()),
        }
    }
}

impl From<MalformedDataError> for SearchError {
    fn from(value: MalformedDataError) -> Self {
        SearchError::MalformedData(value.to_string())
    }
}
