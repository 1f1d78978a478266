//! The three day buckets of a route network's timetable.

use super::day::DayBucket;
use super::departure::DepartureRecord;

/// A full timetable: departures for each day bucket, in the order the feed
/// published them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    weekday: Vec<DepartureRecord>,
    saturday: Vec<DepartureRecord>,
    sunday: Vec<DepartureRecord>,
}

impl Schedule {
    pub fn new(
        weekday: Vec<DepartureRecord>,
        saturday: Vec<DepartureRecord>,
        sunday: Vec<DepartureRecord>,
    ) -> Self {
        Self {
            weekday,
            saturday,
            sunday,
        }
    }

    /// A schedule with three empty buckets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Departures for one day bucket.
    pub fn bucket(&self, day: DayBucket) -> &[DepartureRecord] {
        match day {
            DayBucket::Weekday => &self.weekday,
            DayBucket::Saturday => &self.saturday,
            DayBucket::Sunday => &self.sunday,
        }
    }

    /// Total number of departures across all buckets.
    pub fn len(&self) -> usize {
        self.weekday.len() + self.saturday.len() + self.sunday.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
