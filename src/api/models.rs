//! Wire models for the scraping API.
//!
//! The client talks to three endpoints:
//! - `POST /scrape` accepts a [`ScrapeRequest`] and answers with [`JobAccepted`]
//! - `GET /data/{job_id}` returns a [`JobSnapshot`] describing job progress
//! - `GET /download/{job_id}/{kind}` streams a CSV export, see [`DownloadKind`]
//!
//! # Status payload
//!
//! ```json
//! {
//!   "status": "completed",
//!   "channel_details": [
//!     {
//!       "channel_url": "https://www.youtube.com/@rustlang",
//!       "nationality": "Not found",
//!       "joined_on": "Jan 1, 2015",
//!       "subscribers": "120K",
//!       "videos_count": "1,204 videos",
//!       "total_views": "9,100,000 views"
//!     }
//!   ]
//! }
//! ```
//!
//! Any field of a channel may carry the sentinel text [`NOT_FOUND`] instead of a value.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

/// Placeholder the scraper writes when a field could not be determined
pub const NOT_FOUND: &str = "Not found";

/// Validated search input; built only by [`crate::controller::validate_search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub(crate) query: String,
    pub(crate) max_results: NonZeroU32,
}

impl SearchRequest {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn max_results(&self) -> u32 {
        self.max_results.get()
    }

    pub fn to_wire(&self) -> ScrapeRequest {
        ScrapeRequest {
            search_query: self.query.clone(),
            max_channel_links: self.max_results.get(),
        }
    }
}

/// Body of `POST /scrape`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub search_query: String,
    pub max_channel_links: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JobAccepted {
    pub job_id: String,
}

/// Error body of a rejected request
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Body of `GET /data/{job_id}`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JobSnapshot {
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_details: Option<Vec<RawChannel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Job lifecycle as reported by the server.
///
/// Values outside the known set are kept verbatim in [`JobStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "queued" => JobStatus::Queued,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Other(value),
        }
    }
}

impl From<JobStatus> for String {
    fn from(value: JobStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel record exactly as the scraper reports it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawChannel {
    pub channel_url: String,
    #[serde(default = "not_found")]
    pub nationality: String,
    #[serde(default = "not_found")]
    pub joined_on: String,
    #[serde(default = "not_found")]
    pub subscribers: String,
    #[serde(default = "not_found")]
    pub videos_count: String,
    #[serde(default = "not_found")]
    pub total_views: String,
}

fn not_found() -> String {
    NOT_FOUND.to_string()
}

#[derive(Debug, Error)]
#[error("unknown download kind '{0}', expected 'details' or 'urls'")]
pub struct UnknownDownloadKind(String);

/// CSV export flavours offered by `GET /download/{job_id}/{kind}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadKind {
    #[default]
    Details,
    Urls,
}

impl DownloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadKind::Details => "details",
            DownloadKind::Urls => "urls",
        }
    }

    /// File name offered to the user for this export
    pub fn file_name(&self) -> String {
        format!("youtube_channels_{}.csv", self.as_str())
    }
}

impl FromStr for DownloadKind {
    type Err = UnknownDownloadKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "details" => Ok(DownloadKind::Details),
            "urls" => Ok(DownloadKind::Urls),
            other => Err(UnknownDownloadKind(other.to_string())),
        }
    }
}

impl fmt::Display for DownloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Export fetched from the download endpoint; the body is opaque to the client
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub file_name: String,
    pub content_type: Option<mime::Mime>,
    pub bytes: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_known_and_unknown() {
        let snapshot: JobSnapshot = serde_json::from_str(r#"{"status": "processing"}"#).unwrap();
        assert_eq!(snapshot.status, JobStatus::Processing);
        assert!(snapshot.channel_details.is_none());

        let snapshot: JobSnapshot = serde_json::from_str(r#"{"status": "paused"}"#).unwrap();
        assert_eq!(snapshot.status, JobStatus::Other("paused".to_string()));
        assert_eq!(snapshot.status.to_string(), "paused");
    }

    #[test]
    fn test_failed_snapshot_carries_error() {
        let snapshot: JobSnapshot =
            serde_json::from_str(r#"{"status": "failed", "error": "quota exceeded"}"#).unwrap();
        assert_eq!(snapshot.status, JobStatus::Failed);
        assert_eq!(snapshot.error.as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn test_raw_channel_missing_fields_become_sentinels() {
        let raw: RawChannel =
            serde_json::from_str(r#"{"channel_url": "https://www.youtube.com/@a"}"#).unwrap();
        assert_eq!(raw.nationality, NOT_FOUND);
        assert_eq!(raw.videos_count, NOT_FOUND);
    }

    #[test]
    fn test_scrape_request_wire_names() {
        let body = serde_json::to_value(ScrapeRequest {
            search_query: "rust".to_string(),
            max_channel_links: 10,
        })
        .unwrap();
        assert_eq!(body["search_query"], "rust");
        assert_eq!(body["max_channel_links"], 10);
    }

    #[test]
    fn test_download_kind_parsing() {
        assert_eq!("details".parse::<DownloadKind>().unwrap(), DownloadKind::Details);
        assert_eq!("URLS".parse::<DownloadKind>().unwrap(), DownloadKind::Urls);
        assert!("pdf".parse::<DownloadKind>().is_err());
        assert_eq!(DownloadKind::Urls.file_name(), "youtube_channels_urls.csv");
    }
}
