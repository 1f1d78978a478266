//! Domain types for the departure board.
//!
//! Raw feed data is turned into these types once, at ingestion. Direction
//! and base route are derived from the raw reference there and never
//! re-derived downstream.

mod day;
mod departure;
mod schedule;
mod time;

pub use day::{DayBucket, InvalidDayBucket};
pub use departure::{BaseRoute, DepartureRecord, Direction, DirectionRef};
pub use schedule::Schedule;
pub use time::{MINUTES_PER_DAY, minute_of_day, to_minutes};
