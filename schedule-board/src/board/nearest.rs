//! Picking the departure that matters right now.
//!
//! Given the departures of a direction variant and the current minute of the
//! day, the resolver designates one departure as "next".
//! [`NearestPolicy::NextUpcoming`] is the default.
//! [`NearestPolicy::AbsoluteClosest`] treats past and future trips alike and
//! is only used when configured.

use std::fmt;
use std::str::FromStr;

use crate::domain::{DepartureRecord, DirectionRef};

/// How the "next" departure is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NearestPolicy {
    /// Soonest departure at or after now; once the day's last departure has
    /// passed, the first departure in the list.
    #[default]
    NextUpcoming,

    /// Departure closest to now in either direction.
    AbsoluteClosest,
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown nearest-departure policy: {0:?} (expected next-upcoming or absolute-closest)")]
pub struct InvalidPolicy(pub String);

impl FromStr for NearestPolicy {
    type Err = InvalidPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "next-upcoming" | "next" => Ok(NearestPolicy::NextUpcoming),
            "absolute-closest" | "closest" => Ok(NearestPolicy::AbsoluteClosest),
            _ => Err(InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for NearestPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NearestPolicy::NextUpcoming => f.write_str("next-upcoming"),
            NearestPolicy::AbsoluteClosest => f.write_str("absolute-closest"),
        }
    }
}

impl NearestPolicy {
    /// Resolve the designated departure for `direction` at `now_minutes`.
    ///
    /// Only departures serving `direction` are considered. Ties go to the
    /// departure listed first. Returns `None` when nothing serves the
    /// direction.
    pub fn resolve<'a>(
        &self,
        departures: &'a [DepartureRecord],
        direction: &DirectionRef,
        now_minutes: u16,
    ) -> Option<&'a DepartureRecord> {
        let mut matching = departures.iter().filter(|d| d.serves(direction));

        match self {
            NearestPolicy::NextUpcoming => {
                let first = matching.next()?;
                let mut best: Option<(&DepartureRecord, u16)> = None;

                for departure in std::iter::once(first).chain(matching) {
                    let minutes = departure.minutes();
                    if minutes < now_minutes {
                        continue;
                    }
                    let wait = minutes - now_minutes;
                    if best.is_none_or(|(_, best_wait)| wait < best_wait) {
                        best = Some((departure, wait));
                    }
                }

                Some(best.map_or(first, |(departure, _)| departure))
            }
            NearestPolicy::AbsoluteClosest => {
                let mut best: Option<(&DepartureRecord, u16)> = None;

                for departure in matching {
                    let gap = departure.minutes().abs_diff(now_minutes);
                    if best.is_none_or(|(_, best_gap)| gap < best_gap) {
                        best = Some((departure, gap));
                    }
                }

                best.map(|(departure, _)| departure)
            }
        }
    }
}

/// Resolve the next departure for `direction` using the default
/// [`NearestPolicy::NextUpcoming`] policy.
///
/// # Examples
///
/// ```
/// use schedule_board::board::resolve_nearest;
/// use schedule_board::domain::{DepartureRecord, DirectionRef};
///
/// let departures: Vec<DepartureRecord> = ["08:00", "08:30", "09:00"]
///     .iter()
///     .map(|t| DepartureRecord::new(*t, "Ida Centro", vec!["Centro".into()]))
///     .collect();
/// let ida = DirectionRef::parse("Ida Centro").unwrap();
///
/// // 08:45: the 09:00 is next
/// assert_eq!(resolve_nearest(&departures, &ida, 525).unwrap().label, "09:00");
///
/// // 23:59: everything has left, fall back to the first departure
/// assert_eq!(resolve_nearest(&departures, &ida, 1439).unwrap().label, "08:00");
/// ```
pub fn resolve_nearest<'a>(
    departures: &'a [DepartureRecord],
    direction: &DirectionRef,
    now_minutes: u16,
) -> Option<&'a DepartureRecord> {
    NearestPolicy::NextUpcoming.resolve(departures, direction, now_minutes)
}
