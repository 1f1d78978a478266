//! Conversion from feed DTOs to domain types.
//!
//! Ingestion never fails: missing labels become empty (and so normalize to
//! midnight), missing references become "no direction", missing stop lists
//! become empty.

use tracing::debug;

use crate::domain::{DepartureRecord, Schedule};

use super::types::{DepartureDto, ScheduleDto};

/// Convert a parsed feed into a schedule.
pub fn convert_schedule(dto: ScheduleDto) -> Schedule {
    Schedule::new(
        convert_bucket("weekday", dto.weekday),
        convert_bucket("saturday", dto.saturday),
        convert_bucket("sunday", dto.sunday),
    )
}

fn convert_bucket(day: &str, departures: Vec<DepartureDto>) -> Vec<DepartureRecord> {
    let records: Vec<DepartureRecord> = departures.into_iter().map(convert_departure).collect();

    let without_direction = records
        .iter()
        .filter(|r| r.direction_ref.is_none())
        .count();
    if without_direction > 0 {
        debug!(
            day,
            without_direction, "departures without a direction reference"
        );
    }

    records
}

fn convert_departure(dto: DepartureDto) -> DepartureRecord {
    DepartureRecord::new(
        dto.name.unwrap_or_default(),
        dto.direction_ref.as_deref().unwrap_or_default(),
        dto.stops.unwrap_or_default(),
    )
}
