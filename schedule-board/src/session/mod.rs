//! Board session: the selection state machine.
//!
//! A [`BoardSession`] ties together the schedule snapshot, the user's
//! selection (day, direction, stop filter) and the highlight controller.
//! Every transition that invalidates the current selection stops the
//! highlight before the selection changes, so a pending tick can never
//! designate a departure for a direction that is no longer shown.

mod error;
mod selection;


pub use error::SessionError;
pub use selection::{DayMode, SelectionState};

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::board::{
    HighlightConfig, HighlightController, RouteGroups, ScrollTarget, filter_by_stop, group_routes,
};
use crate::clock::Clock;
use crate::domain::{DayBucket, DepartureRecord, DirectionRef, Schedule};
use crate::feed::ScheduleSource;
use crate::repository::{LoadStatus, ScheduleRepository};

/// One user's view of the board.
pub struct BoardSession {
    repository: ScheduleRepository,
    clock: Arc<dyn Clock>,
    selection: SelectionState,
    highlight: HighlightController,
}

impl BoardSession {
    /// Start a session on today's bucket, in automatic day mode.
    pub fn new(repository: ScheduleRepository, clock: Arc<dyn Clock>, config: HighlightConfig) -> Self {
        let day = clock.today();
        info!(day = %day, "board session started");
        Self {
            repository,
            highlight: HighlightController::new(Arc::clone(&clock), config),
            clock,
            selection: SelectionState::new(day),
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn day(&self) -> DayBucket {
        self.selection.day()
    }

    pub fn day_mode(&self) -> DayMode {
        self.selection.mode()
    }

    /// Switch to `day` as a manual override.
    ///
    /// Always clears the selected direction and stops the highlight, even if
    /// `day` is the day already shown.
    pub fn set_day(&mut self, day: DayBucket) {
        self.highlight.stop();
        self.selection.set_manual_day(day);
        info!(day = %day, "day overridden");
    }

    /// Go back to following the real-world weekday.
    ///
    /// The selection survives if the inferred day is the one already shown.
    pub fn use_automatic_day(&mut self) -> DayBucket {
        let today = self.clock.today();
        if today != self.selection.day() {
            self.highlight.stop();
        }
        if self.selection.set_automatic_day(today) {
            info!(day = %today, "automatic day");
        }
        today
    }

    /// Follow a weekday rollover (for example at midnight) while in
    /// automatic mode. Returns whether the day changed.
    ///
    /// Manual overrides are left alone.
    pub fn sync_automatic_day(&mut self) -> bool {
        if self.selection.mode() != DayMode::Automatic {
            return false;
        }
        let today = self.clock.today();
        if today == self.selection.day() {
            return false;
        }
        self.highlight.stop();
        self.selection.set_automatic_day(today);
        info!(day = %today, "day rolled over");
        true
    }

    /// Route groups for the active day.
    pub async fn groups(&self) -> RouteGroups {
        let schedule = self.repository.snapshot().await;
        group_routes(schedule.bucket(self.selection.day()))
    }

    /// Select `direction` and start highlighting its next departure.
    ///
    /// Fails without changing anything if no departure in the active day
    /// serves `direction`. Returns the designated departure, which may be
    /// `None` when the stop filter hides every departure of the direction.
    pub async fn select_direction(
        &mut self,
        direction: &DirectionRef,
    ) -> Result<Option<DepartureRecord>, SessionError> {
        let schedule = self.repository.snapshot().await;
        let day = self.selection.day();
        if !schedule.bucket(day).iter().any(|d| d.serves(direction)) {
            return Err(SessionError::UnknownDirection {
                direction: direction.as_str().to_string(),
                day,
            });
        }

        let departures = self.departures_for(&schedule, direction);
        self.selection.select(direction.clone());
        Ok(self.highlight.track(direction.clone(), departures))
    }

    /// Clear the selected direction and stop highlighting.
    pub fn deselect(&mut self) {
        self.highlight.stop();
        self.selection.clear_direction();
    }

    /// Narrow the visible departures to those calling at a matching stop.
    ///
    /// The designated departure is re-resolved against the filtered list.
    pub async fn set_stop_filter(&mut self, query: &str) -> Option<DepartureRecord> {
        self.selection.set_stop_filter(query);
        let direction = self.selection.direction()?.clone();
        let schedule = self.repository.snapshot().await;
        let departures = self.departures_for(&schedule, &direction);
        self.highlight.update_departures(departures)
    }

    pub fn stop_filter(&self) -> &str {
        self.selection.stop_filter()
    }

    pub fn selected(&self) -> Option<&DirectionRef> {
        self.selection.direction()
    }

    /// Departures of the selected direction after the stop filter, in
    /// listed order. Empty when nothing is selected.
    pub async fn visible_departures(&self) -> Vec<DepartureRecord> {
        let Some(direction) = self.selection.direction() else {
            return Vec::new();
        };
        let schedule = self.repository.snapshot().await;
        self.departures_for(&schedule, direction)
    }

    pub fn highlighted(&self) -> Option<DepartureRecord> {
        self.highlight.highlighted()
    }

    /// Subscribe to changes of the departure to scroll into view.
    pub fn scroll_target(&self) -> watch::Receiver<ScrollTarget> {
        self.highlight.scroll_target()
    }

    pub fn is_tracking(&self) -> bool {
        self.highlight.is_tracking()
    }

    pub async fn load_status(&self) -> LoadStatus {
        self.repository.status().await
    }

    /// Refresh the schedule from `source`.
    ///
    /// A tracked direction that still has departures keeps being tracked
    /// against the new data; otherwise the selection is cleared.
    pub async fn reload<S: ScheduleSource>(&mut self, source: &S) -> LoadStatus {
        let status = self.repository.refresh(source).await;

        if let Some(direction) = self.selection.direction().cloned() {
            let schedule = self.repository.snapshot().await;
            let day = self.selection.day();
            if schedule.bucket(day).iter().any(|d| d.serves(&direction)) {
                let departures = self.departures_for(&schedule, &direction);
                self.highlight.update_departures(departures);
            } else {
                info!(direction = %direction, "selected direction gone after reload");
                self.deselect();
            }
        }

        status
    }

    fn departures_for(&self, schedule: &Schedule, direction: &DirectionRef) -> Vec<DepartureRecord> {
        filter_by_stop(schedule.bucket(self.selection.day()), self.selection.stop_filter())
            .iter()
            .filter(|d| d.serves(direction))
            .cloned()
            .collect()
    }
}
