//! Schedule repository: the session's single copy of the timetable.
//!
//! The repository owns the schedule and hands out immutable snapshots.
//! Loading never fails: if the source cannot be read the repository holds
//! three empty buckets and records why, so the board keeps working with no
//! data and can say so.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::Schedule;
use crate::feed::ScheduleSource;

/// Outcome of the most recent load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing has been loaded yet.
    Pending,
    /// The schedule was loaded from the source.
    Loaded,
    /// The most recent fetch failed. The repository still holds the last good
    /// schedule, or empty buckets if there never was one.
    Failed(String),
}

#[derive(Debug)]
struct Snapshot {
    schedule: Arc<Schedule>,
    status: LoadStatus,
}

/// Thread-safe holder of the current schedule snapshot.
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    inner: Arc<RwLock<Snapshot>>,
}

impl ScheduleRepository {
    /// Create an empty repository (three empty buckets, nothing loaded yet).
    pub fn empty() -> Self {
        Self::with_snapshot(Arc::new(Schedule::empty()), LoadStatus::Pending)
    }

    /// Create a repository holding an already ingested schedule.
    pub fn from_schedule(schedule: Schedule) -> Self {
        Self::with_snapshot(Arc::new(schedule), LoadStatus::Loaded)
    }

    fn with_snapshot(schedule: Arc<Schedule>, status: LoadStatus) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Snapshot { schedule, status })),
        }
    }

    /// Load the schedule from `source`.
    ///
    /// On failure the repository holds three empty buckets and
    /// [`LoadStatus::Failed`]; the error is logged, not returned.
    pub async fn load<S: ScheduleSource>(source: &S) -> Self {
        let repository = Self::empty();
        repository.refresh(source).await;
        repository
    }

    /// Replace the snapshot with a fresh fetch from `source`.
    ///
    /// On failure the current snapshot is kept (empty buckets if nothing
    /// was ever loaded) and the status records the error. Returns the new
    /// status.
    pub async fn refresh<S: ScheduleSource>(&self, source: &S) -> LoadStatus {
        match source.fetch().await {
            Ok(schedule) => {
                info!(
                    source = source.name(),
                    departures = schedule.len(),
                    "schedule loaded"
                );
                let mut guard = self.inner.write().await;
                *guard = Snapshot {
                    schedule,
                    status: LoadStatus::Loaded,
                };
                LoadStatus::Loaded
            }
            Err(e) => {
                warn!(source = source.name(), error = %e, "failed to load schedule");
                let status = LoadStatus::Failed(e.to_string());
                let mut guard = self.inner.write().await;
                guard.status = status.clone();
                status
            }
        }
    }

    /// The current schedule snapshot.
    pub async fn snapshot(&self) -> Arc<Schedule> {
        let guard = self.inner.read().await;
        Arc::clone(&guard.schedule)
    }

    /// Outcome of the most recent load.
    pub async fn status(&self) -> LoadStatus {
        let guard = self.inner.read().await;
        guard.status.clone()
    }
}

impl Default for ScheduleRepository {
    fn default() -> Self {
        Self::empty()
    }
}
