//! Schedule feed: where the timetable comes from.
//!
//! The feed is one JSON document with an array of departures per day
//! bucket. [`ScheduleClient`] fetches it over HTTP, [`FileScheduleSource`]
//! reads it from disk, and both ingest it into domain types behind the
//! [`ScheduleSource`] trait.

mod client;
mod convert;
mod error;
mod file;
mod source;
mod types;

pub use client::{DEFAULT_FEED_URL, ScheduleClient, ScheduleClientConfig};
pub use convert::convert_schedule;
pub use error::FeedError;
pub use file::FileScheduleSource;
pub use source::ScheduleSource;
pub use types::{DepartureDto, ScheduleDto};
