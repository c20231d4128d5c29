use std::path::PathBuf;
use thiserror::Error;

/// Problems with the product/time selection, detected before any network access.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Product '{0}' not supported")]
    InvalidProduct(String),

    #[error("No date and time specified for a non-latest request")]
    MissingDateTime,
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    // Covers stream errors and gzip decompression
    #[error("Data download or decompression failed")]
    DownloadIo(#[from] std::io::Error),

    #[error("Failed to create download directory '{0}'")]
    TargetDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write downloaded data to '{0}'")]
    FileWrite(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
