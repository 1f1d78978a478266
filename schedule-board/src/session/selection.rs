//! What the user is currently looking at.

use crate::domain::{DayBucket, DirectionRef};

/// How the active day bucket was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMode {
    /// Follows the real-world weekday.
    Automatic,
    /// The user picked a day explicitly.
    ManualOverride,
}

/// Transient selection state for one board session.
///
/// Never persisted; rebuilt from the clock when a session starts. Changing
/// the day always clears the selected direction, so a direction can never
/// outlive the bucket it was chosen from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    day: DayBucket,
    mode: DayMode,
    direction: Option<DirectionRef>,
    stop_filter: String,
}

impl SelectionState {
    /// Initial state: the given (inferred) day, automatic mode, nothing
    /// selected.
    pub fn new(day: DayBucket) -> Self {
        Self {
            day,
            mode: DayMode::Automatic,
            direction: None,
            stop_filter: String::new(),
        }
    }

    pub fn day(&self) -> DayBucket {
        self.day
    }

    pub fn mode(&self) -> DayMode {
        self.mode
    }

    pub fn direction(&self) -> Option<&DirectionRef> {
        self.direction.as_ref()
    }

    pub fn stop_filter(&self) -> &str {
        &self.stop_filter
    }

    /// Explicit user day choice: switches to manual mode and clears the
    /// selected direction.
    pub fn set_manual_day(&mut self, day: DayBucket) {
        self.mode = DayMode::ManualOverride;
        self.day = day;
        self.direction = None;
    }

    /// Return to automatic mode with the day inferred from the clock.
    ///
    /// The selected direction is cleared only if the day actually changes.
    /// Returns whether it did.
    pub fn set_automatic_day(&mut self, today: DayBucket) -> bool {
        self.mode = DayMode::Automatic;
        if self.day == today {
            return false;
        }
        self.day = today;
        self.direction = None;
        true
    }

    pub fn select(&mut self, direction: DirectionRef) {
        self.direction = Some(direction);
    }

    pub fn clear_direction(&mut self) {
        self.direction = None;
    }

    pub fn set_stop_filter(&mut self, query: &str) {
        self.stop_filter = query.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ida() -> DirectionRef {
        DirectionRef::parse("Ida Centro").unwrap()
    }

    #[test]
    fn starts_automatic_with_nothing_selected() {
        let state = SelectionState::new(DayBucket::Saturday);
        assert_eq!(state.day(), DayBucket::Saturday);
        assert_eq!(state.mode(), DayMode::Automatic);
        assert!(state.direction().is_none());
        assert_eq!(state.stop_filter(), "");
    }

    #[test]
    fn manual_day_clears_direction() {
        let mut state = SelectionState::new(DayBucket::Weekday);
        state.select(ida());

        state.set_manual_day(DayBucket::Sunday);
        assert_eq!(state.day(), DayBucket::Sunday);
        assert_eq!(state.mode(), DayMode::ManualOverride);
        assert!(state.direction().is_none());
    }

    #[test]
    fn manual_same_day_still_clears_direction() {
        let mut state = SelectionState::new(DayBucket::Weekday);
        state.select(ida());

        state.set_manual_day(DayBucket::Weekday);
        assert_eq!(state.mode(), DayMode::ManualOverride);
        assert!(state.direction().is_none());
    }

    #[test]
    fn automatic_keeps_direction_when_day_unchanged() {
        let mut state = SelectionState::new(DayBucket::Weekday);
        state.set_manual_day(DayBucket::Weekday);
        state.select(ida());

        assert!(!state.set_automatic_day(DayBucket::Weekday));
        assert_eq!(state.mode(), DayMode::Automatic);
        assert_eq!(state.direction(), Some(&ida()));
    }

    #[test]
    fn automatic_day_change_clears_direction() {
        let mut state = SelectionState::new(DayBucket::Weekday);
        state.set_manual_day(DayBucket::Sunday);
        state.select(ida());

        assert!(state.set_automatic_day(DayBucket::Weekday));
        assert_eq!(state.day(), DayBucket::Weekday);
        assert!(state.direction().is_none());
    }

    #[test]
    fn stop_filter_survives_day_change() {
        let mut state = SelectionState::new(DayBucket::Weekday);
        state.set_stop_filter("norte");
        state.set_manual_day(DayBucket::Saturday);
        assert_eq!(state.stop_filter(), "norte");
    }
}
