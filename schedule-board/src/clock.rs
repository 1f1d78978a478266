//! Wall-clock access.
//!
//! The board only ever needs the local date and time. Reading them through
//! [`Clock`] lets tests drive the highlight timer with a clock they control.

use std::sync::{Arc, Mutex};

use chrono::{Datelike, Local, NaiveDateTime};

use crate::domain::{DayBucket, minute_of_day};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current minute of the day.
    fn now_minutes(&self) -> u16 {
        minute_of_day(self.now().time())
    }

    /// Day bucket for today's weekday.
    fn today(&self) -> DayBucket {
        DayBucket::for_weekday(self.now().weekday())
    }
}

/// The local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Move the clock to `now`. Clones of this clock see the change.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
