//! Session error types.

use crate::domain::DayBucket;

/// Errors from board session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The requested direction has no departures in the active day bucket
    #[error("no departures for {direction:?} on {day}")]
    UnknownDirection { direction: String, day: DayBucket },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SessionError::UnknownDirection {
            direction: "Ida Centro".into(),
            day: DayBucket::Sunday,
        };
        assert_eq!(err.to_string(), "no departures for \"Ida Centro\" on sunday");
    }
}
