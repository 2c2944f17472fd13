//! Scraping API client: wire models, the [`JobClient`] seam and its HTTP implementation.

mod client;
mod error;
pub mod models;

pub use client::{HttpConfig, HttpJobClient, JobClient};
pub use error::ClientError;
pub use models::{
    DownloadKind, DownloadedFile, JobSnapshot, JobStatus, RawChannel, SearchRequest, NOT_FOUND,
};
