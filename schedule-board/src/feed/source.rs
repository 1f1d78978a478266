//! The seam between the board and wherever its schedule comes from.

use std::future::Future;
use std::sync::Arc;

use crate::domain::Schedule;

use super::error::FeedError;

/// Something that can produce the route network's schedule.
///
/// Implementations convert the feed into domain types before returning, so
/// callers only ever see ingested [`Schedule`]s.
pub trait ScheduleSource: Send + Sync {
    /// Human-readable identity of the source (URL or path), used for logging
    /// and as the cache key.
    fn name(&self) -> &str;

    /// Fetch and ingest the schedule.
    fn fetch(&self) -> impl Future<Output = Result<Arc<Schedule>, FeedError>> + Send;
}
