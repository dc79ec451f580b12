/// Errors from fetching the session catalogue.
///
/// These are fatal: without the catalogue there is no work list, so the
/// whole run aborts.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalogue endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Failed to parse catalogue response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from a single deck download.
///
/// Recovered locally: the session is counted as failed and the run
/// continues with the remaining sessions.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
