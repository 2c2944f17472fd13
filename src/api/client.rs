//! HTTP client for the scraping API

use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{ClientError, Result};
use super::models::{
    DownloadKind, DownloadedFile, ErrorDetail, JobAccepted, JobSnapshot, SearchRequest,
};
use crate::config::ApiConfig;

const SUBMISSION_FALLBACK: &str = "Failed to queue scrape job";

/// Network operations needed to drive a scraping job.
///
/// `fetch_status` returns `Ok(None)` when the server answered without a
/// success status: there is no update this round, but the job is not lost.
#[async_trait]
pub trait JobClient: Send + Sync {
    /// Create a job and return its id
    async fn submit(&self, request: &SearchRequest) -> Result<String>;

    /// Fetch the current job state
    async fn fetch_status(&self, job_id: &str) -> Result<Option<JobSnapshot>>;

    /// Fetch a CSV export of a finished job
    async fn download(&self, job_id: &str, kind: DownloadKind) -> Result<DownloadedFile>;
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl From<&ApiConfig> for HttpConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            connect_timeout: config.connect_timeout.as_duration(),
            request_timeout: config.request_timeout.as_duration(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

/// reqwest-backed [`JobClient`]
pub struct HttpJobClient {
    client: Client,
    base_url: String,
}

impl HttpJobClient {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl JobClient for HttpJobClient {
    async fn submit(&self, request: &SearchRequest) -> Result<String> {
        let url = self.url("/scrape");
        debug!(url = %url, query = request.query(), max = request.max_results(), "Submitting scrape job");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&request.to_wire())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Rejections may or may not carry a JSON detail
            let detail = response
                .json::<ErrorDetail>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .filter(|detail| !detail.is_empty());

            warn!(url = %url, status = status.as_u16(), ?detail, "Scrape job rejected");
            return Err(ClientError::Submission(
                detail.unwrap_or_else(|| SUBMISSION_FALLBACK.to_string()),
            ));
        }

        let accepted: JobAccepted = response.json().await?;
        debug!(job_id = %accepted.job_id, "Scrape job queued");

        Ok(accepted.job_id)
    }

    async fn fetch_status(&self, job_id: &str) -> Result<Option<JobSnapshot>> {
        let url = self.url(&format!("/data/{}", job_id));

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(
                job_id,
                status = status.as_u16(),
                reason = status.canonical_reason().unwrap_or("Unknown"),
                "No status update this round"
            );
            return Ok(None);
        }

        let snapshot: JobSnapshot = response.json().await?;
        Ok(Some(snapshot))
    }

    async fn download(&self, job_id: &str, kind: DownloadKind) -> Result<DownloadedFile> {
        let url = self.url(&format!("/download/{}/{}", job_id, kind));
        debug!(url = %url, "Starting download");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Download {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<mime::Mime>().ok());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(format!("Failed to read body: {}", e)))?;

        debug!(job_id, kind = %kind, size = bytes.len(), "Download completed");

        Ok(DownloadedFile {
            file_name: kind.file_name(),
            content_type,
            bytes,
        })
    }
}
