//! Live highlighting of the next departure.
//!
//! While a direction is selected the controller keeps one departure
//! designated as "next" and re-evaluates it on a fixed interval as the clock
//! moves. The view layer follows changes through a scroll-target channel that
//! only fires when the designated departure actually changes.
//!
//! Exactly one timer task exists while tracking, owned through a single
//! handle. Every tracking session carries a generation number: transitions
//! abort the task and bump the generation under the lock before replacing
//! state, so a tick that was already queued when the task was cancelled can
//! never write a highlight for a previous selection.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::domain::{DepartureRecord, DirectionRef};

use super::config::HighlightConfig;
use super::nearest::NearestPolicy;

/// Label of the departure the view should scroll to, if any.
pub type ScrollTarget = Option<String>;

/// Whether the controller is following a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No direction selected; no timer running.
    Idle,
    /// A direction is selected and re-evaluated periodically.
    Tracking,
}

/// The direction being followed and the departures it is resolved against.
#[derive(Debug)]
struct Target {
    direction: DirectionRef,
    departures: Vec<DepartureRecord>,
}

#[derive(Debug, Default)]
struct TrackState {
    generation: u64,
    target: Option<Target>,
    highlighted: Option<DepartureRecord>,
}

/// State shared between the controller and its timer task.
#[derive(Debug)]
struct Shared {
    state: Mutex<TrackState>,
    scroll: watch::Sender<ScrollTarget>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, TrackState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Handle one timer tick. Returns `false` once the tick belongs to a
    /// tracking session that has ended.
    fn tick(&self, generation: u64, now_minutes: u16, policy: NearestPolicy) -> bool {
        let mut state = self.lock();
        if state.generation != generation || state.target.is_none() {
            return false;
        }
        self.resolve(&mut state, now_minutes, policy);
        true
    }

    /// Re-resolve the designated departure and publish the scroll target if
    /// it changed.
    fn resolve(&self, state: &mut TrackState, now_minutes: u16, policy: NearestPolicy) {
        let next = state.target.as_ref().and_then(|t| {
            policy
                .resolve(&t.departures, &t.direction, now_minutes)
                .cloned()
        });

        if next != state.highlighted {
            debug!(
                from = ?state.highlighted.as_ref().map(|d| d.label.as_str()),
                to = ?next.as_ref().map(|d| d.label.as_str()),
                now_minutes,
                "highlighted departure changed"
            );
            state.highlighted = next;
        }

        let label = state.highlighted.as_ref().map(|d| d.label.clone());
        self.publish(label);
    }

    fn publish(&self, label: ScrollTarget) {
        self.scroll.send_if_modified(|current| {
            if *current == label {
                false
            } else {
                *current = label;
                true
            }
        });
    }
}

/// Keeps the "next departure" designation current for a selected direction.
///
/// Methods that start tracking spawn a timer task, so they must be called
/// from within a tokio runtime.
pub struct HighlightController {
    clock: Arc<dyn Clock>,
    config: HighlightConfig,
    shared: Arc<Shared>,
    timer: Option<JoinHandle<()>>,
}

impl HighlightController {
    /// Create an idle controller.
    pub fn new(clock: Arc<dyn Clock>, config: HighlightConfig) -> Self {
        let (scroll, _) = watch::channel(None);
        Self {
            clock,
            config,
            shared: Arc::new(Shared {
                state: Mutex::new(TrackState::default()),
                scroll,
            }),
            timer: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        if self.shared.lock().target.is_some() {
            ControllerState::Tracking
        } else {
            ControllerState::Idle
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.state() == ControllerState::Tracking
    }

    /// Whether a timer task is currently owned by the controller.
    pub fn timer_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// The currently designated departure.
    pub fn highlighted(&self) -> Option<DepartureRecord> {
        self.shared.lock().highlighted.clone()
    }

    /// Subscribe to scroll-target changes.
    ///
    /// The channel only signals when the designated departure's label
    /// changes, not on every tick.
    pub fn scroll_target(&self) -> watch::Receiver<ScrollTarget> {
        self.shared.scroll.subscribe()
    }

    /// Start following `direction`, resolving against `departures`.
    ///
    /// Resolves once immediately, then on every tick. Any previous tracking
    /// session is ended first. Returns the designated departure.
    pub fn track(
        &mut self,
        direction: DirectionRef,
        departures: Vec<DepartureRecord>,
    ) -> Option<DepartureRecord> {
        self.cancel_timer();

        let generation = {
            let mut state = self.shared.lock();
            state.generation += 1;
            info!(
                direction = %direction,
                departures = departures.len(),
                generation = state.generation,
                "tracking direction"
            );
            state.target = Some(Target {
                direction,
                departures,
            });
            self.shared
                .resolve(&mut state, self.clock.now_minutes(), self.config.policy);
            state.generation
        };

        self.start_timer(generation);
        self.highlighted()
    }

    /// Replace the departures of the tracked direction (for example after
    /// the stop filter changed) and re-resolve immediately.
    ///
    /// Does nothing while idle.
    pub fn update_departures(&mut self, departures: Vec<DepartureRecord>) -> Option<DepartureRecord> {
        let mut state = self.shared.lock();
        let Some(target) = state.target.as_mut() else {
            return None;
        };
        target.departures = departures;
        self.shared
            .resolve(&mut state, self.clock.now_minutes(), self.config.policy);
        state.highlighted.clone()
    }

    /// Stop tracking: cancel the timer and clear the designation.
    pub fn stop(&mut self) {
        self.cancel_timer();

        let mut state = self.shared.lock();
        state.generation += 1;
        if state.target.take().is_some() {
            info!(generation = state.generation, "tracking stopped");
        }
        state.highlighted = None;
        self.shared.publish(None);
    }

    fn start_timer(&mut self, generation: u64) {
        let shared = Arc::clone(&self.shared);
        let clock = Arc::clone(&self.clock);
        let policy = self.config.policy;
        let tick = self.config.tick;

        let mut interval = time::interval_at(Instant::now() + tick, tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.timer = Some(tokio::spawn(async move {
            loop {
                interval.tick().await;
                if !shared.tick(generation, clock.now_minutes(), policy) {
                    debug!(generation, "stale highlight timer exiting");
                    break;
                }
            }
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for HighlightController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
