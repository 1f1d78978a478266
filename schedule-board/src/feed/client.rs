//! Schedule feed HTTP client.
//!
//! The feed is a single static JSON document holding every day bucket, so
//! one GET fetches the whole timetable.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::Schedule;

use super::convert::convert_schedule;
use super::error::FeedError;
use super::source::ScheduleSource;
use super::types::ScheduleDto;

/// Default URL of the published schedule.
pub const DEFAULT_FEED_URL: &str = "https://70236255.netlify.app/horarios.json";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the schedule client.
#[derive(Debug, Clone)]
pub struct ScheduleClientConfig {
    /// URL of the schedule JSON.
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ScheduleClientConfig {
    /// Create a new config for the given feed URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ScheduleClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

/// HTTP client for the schedule feed.
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    http: reqwest::Client,
    url: String,
}

impl ScheduleClient {
    /// Create a new schedule client with the given configuration.
    pub fn new(config: ScheduleClientConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Fetch the raw feed document.
    pub async fn fetch_raw(&self) -> Result<ScheduleDto, FeedError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(url = %self.url, bytes = body.len(), "fetched schedule feed");

        serde_json::from_str(&body).map_err(|e| FeedError::json(e, &body))
    }
}

impl ScheduleSource for ScheduleClient {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Arc<Schedule>, FeedError> {
        let dto = self.fetch_raw().await?;
        Ok(Arc::new(convert_schedule(dto)))
    }
}
