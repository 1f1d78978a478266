//! Departure time handling.
//!
//! Schedules label each departure with an "HH:MM" string. Everything that
//! compares departures against the clock works in minutes since midnight,
//! so this module only needs to turn labels (and wall-clock times) into that
//! scale.
//!
//! Parsing is deliberately forgiving: a label that cannot be read degrades to
//! minute 0 instead of failing, so one bad record never takes down grouping
//! or highlighting.

use chrono::{NaiveTime, Timelike};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Convert an "HH:MM" departure label to minutes since midnight.
///
/// Returns a value in `0..1440`. The hour and minute must each be one or two
/// ASCII digits; any other label (signs, surrounding whitespace, extra
/// components) or an out-of-range hour or minute yields `0`.
///
/// # Examples
///
/// ```
/// use schedule_board::domain::to_minutes;
///
/// assert_eq!(to_minutes("00:00"), 0);
/// assert_eq!(to_minutes("08:45"), 525);
/// assert_eq!(to_minutes("23:59"), 1439);
///
/// // Malformed labels degrade to midnight
/// assert_eq!(to_minutes(""), 0);
/// assert_eq!(to_minutes("0845"), 0);
/// assert_eq!(to_minutes("ab:cd"), 0);
/// ```
pub fn to_minutes(label: &str) -> u16 {
    parse_label(label).unwrap_or(0)
}

/// Minutes since midnight for a wall-clock time.
pub fn minute_of_day(time: NaiveTime) -> u16 {
    // hour() < 24 and minute() < 60, so this always fits
    (time.hour() * 60 + time.minute()) as u16
}

fn parse_label(label: &str) -> Option<u16> {
    let (hours, minutes) = label.split_once(':')?;
    let hours = parse_part(hours)?;
    let minutes = parse_part(minutes)?;

    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}

fn parse_part(part: &str) -> Option<u16> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u16..24, minute in 0u16..60) -> (u16, u16) {
            (hour, minute)
        }
    }

    proptest! {
        /// Every well-formed label lands inside the day
        #[test]
        fn result_in_range(label in ".*") {
            prop_assert!(to_minutes(&label) < MINUTES_PER_DAY);
        }

        /// Well-formed labels map to hours*60 + minutes
        #[test]
        fn valid_label_value((h, m) in valid_time()) {
            let label = format!("{:02}:{:02}", h, m);
            prop_assert_eq!(to_minutes(&label), h * 60 + m);
        }

        /// Distinct labels never collide and order follows the clock
        #[test]
        fn injective_and_monotonic(a in valid_time(), b in valid_time()) {
            let la = format!("{:02}:{:02}", a.0, a.1);
            let lb = format!("{:02}:{:02}", b.0, b.1);

            if a != b {
                prop_assert_ne!(to_minutes(&la), to_minutes(&lb));
            }
            prop_assert_eq!(a.cmp(&b), to_minutes(&la).cmp(&to_minutes(&lb)));
        }

        /// Labels without a colon are midnight
        #[test]
        fn no_colon_is_midnight(label in "[^:]*") {
            prop_assert_eq!(to_minutes(&label), 0);
        }

        /// Agrees with the wall-clock conversion
        #[test]
        fn agrees_with_wall_clock((h, m) in valid_time()) {
            let label = format!("{:02}:{:02}", h, m);
            let time = NaiveTime::from_hms_opt(h as u32, m as u32, 0).unwrap();
            prop_assert_eq!(to_minutes(&label), minute_of_day(time));
        }
    }
}
