//! Schedule feed error types.

/// Errors that can occur while fetching or reading the schedule feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed endpoint returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Feed body was not valid schedule JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Local schedule file could not be read
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl FeedError {
    /// Build a JSON error, keeping the start of the offending body for
    /// diagnostics.
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        FeedError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}
