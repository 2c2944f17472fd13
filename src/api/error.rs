use thiserror::Error;

/// Failures raised by the job client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Job creation rejected by the server; carries the server detail when present
    #[error("{0}")]
    Submission(String),

    #[error("HTTP request failed: {0}")]
    Network(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Download failed: HTTP {status}")]
    Download { status: u16 },
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
