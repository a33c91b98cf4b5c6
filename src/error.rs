use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of the single event fetch. Fatal to the harvest.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("no event data found in API response")]
    EmptyEnvelope,
}

/// Failure of one attachment download. Logged and counted, never fatal.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("attachment has no download URL")]
    MissingUrl,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that abort the whole harvest.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to prepare {path}: {source}")]
    Layout {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure while writing one of the export files. Logged and counted, never fatal.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON encoding failed for {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("CSV encoding failed for {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
