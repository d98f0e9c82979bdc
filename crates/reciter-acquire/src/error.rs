use std::path::PathBuf;
use thiserror::Error;

/// Failures from the remote-I/O components.
///
/// None of these abort a run on their own; the pipeline turns each into a
/// per-reciter outcome and a log line.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed roster: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid thumbnail pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid endpoint URL {url:?}: {source}")]
    Endpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}
