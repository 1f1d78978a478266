//! Narrowing departures by stop name.

use std::borrow::Cow;

use crate::domain::DepartureRecord;

/// Keep the departures that call at a stop whose name contains `query`,
/// ignoring case.
///
/// A blank query keeps everything and borrows the input unchanged.
///
/// # Examples
///
/// ```
/// use schedule_board::board::filter_by_stop;
/// use schedule_board::domain::DepartureRecord;
///
/// let departures = vec![
///     DepartureRecord::new("08:00", "Ida Centro", vec!["Centro".into(), "Norte".into()]),
///     DepartureRecord::new("08:30", "Ida Centro", vec!["Centro".into(), "Sur".into()]),
/// ];
///
/// let filtered = filter_by_stop(&departures, "NOR");
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].label, "08:00");
///
/// assert_eq!(filter_by_stop(&departures, "  ").len(), 2);
/// ```
pub fn filter_by_stop<'a>(
    departures: &'a [DepartureRecord],
    query: &str,
) -> Cow<'a, [DepartureRecord]> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Cow::Borrowed(departures);
    }

    Cow::Owned(
        departures
            .iter()
            .filter(|d| d.calls_at_lowercase(&needle))
            .cloned()
            .collect(),
    )
}
