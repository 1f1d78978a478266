//! Day-type buckets.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

/// One of the three day-type partitions of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayBucket {
    Weekday,
    Saturday,
    Sunday,
}

/// Error returned when parsing an unknown day bucket key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day bucket: {0:?} (expected weekday, saturday or sunday)")]
pub struct InvalidDayBucket(pub String);

impl DayBucket {
    /// All buckets, in display order.
    pub const ALL: [DayBucket; 3] = [DayBucket::Weekday, DayBucket::Saturday, DayBucket::Sunday];

    /// Infer the bucket for a calendar weekday number, where 0 is Sunday and
    /// 6 is Saturday.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_board::domain::DayBucket;
    ///
    /// assert_eq!(DayBucket::infer(0), DayBucket::Sunday);
    /// assert_eq!(DayBucket::infer(3), DayBucket::Weekday);
    /// assert_eq!(DayBucket::infer(6), DayBucket::Saturday);
    /// ```
    pub fn infer(weekday_from_sunday: u32) -> Self {
        match weekday_from_sunday {
            0 => DayBucket::Sunday,
            6 => DayBucket::Saturday,
            _ => DayBucket::Weekday,
        }
    }

    /// Infer the bucket for a chrono weekday.
    pub fn for_weekday(weekday: Weekday) -> Self {
        Self::infer(weekday.num_days_from_sunday())
    }

    /// The stable key used in configuration and logs.
    pub fn key(&self) -> &'static str {
        match self {
            DayBucket::Weekday => "weekday",
            DayBucket::Saturday => "saturday",
            DayBucket::Sunday => "sunday",
        }
    }

    /// Heading shown above the board.
    pub fn display_name(&self) -> &'static str {
        match self {
            DayBucket::Weekday => "Lunes a Viernes",
            DayBucket::Saturday => "Sábados",
            DayBucket::Sunday => "Domingos",
        }
    }
}

impl FromStr for DayBucket {
    type Err = InvalidDayBucket;

    /// Accepts the English keys and the names used by the schedule feed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekday" | "lunesaviernes" => Ok(DayBucket::Weekday),
            "saturday" | "sabados" => Ok(DayBucket::Saturday),
            "sunday" | "domingos" => Ok(DayBucket::Sunday),
            _ => Err(InvalidDayBucket(s.to_string())),
        }
    }
}

impl fmt::Display for DayBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
