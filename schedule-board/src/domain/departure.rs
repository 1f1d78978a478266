//! Departure records and direction references.
//!
//! A raw direction reference such as `"Ida Centro - Norte"` carries two
//! things: its first token says which way the trip runs, and the rest names
//! the route. Both are worked out once, when the reference is ingested, and
//! carried as typed fields from then on.

use std::fmt;

use super::time::to_minutes;

/// Which way a trip runs along its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Outbound ("Ida").
    Outbound,
    /// Return ("Vuelta").
    Return,
}

impl Direction {
    /// Classify a raw reference: anything mentioning "vuelta" is a return
    /// trip, everything else is outbound.
    pub fn classify(raw: &str) -> Self {
        if raw.to_lowercase().contains("vuelta") {
            Direction::Return
        } else {
            Direction::Outbound
        }
    }

    /// Button label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Outbound => "Ida",
            Direction::Return => "Vuelta",
        }
    }
}

/// Normalized route name shared by the outbound and return variants of a
/// route.
///
/// Lower-cased, hyphens replaced by spaces, whitespace collapsed and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BaseRoute(String);

impl BaseRoute {
    /// Derive the base route from a raw direction reference by dropping its
    /// first token.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_board::domain::BaseRoute;
    ///
    /// let base = BaseRoute::from_reference("Ida Centro - Norte");
    /// assert_eq!(base.as_str(), "centro norte");
    ///
    /// let base = BaseRoute::from_reference("Vuelta  CENTRO-Norte ");
    /// assert_eq!(base.as_str(), "centro norte");
    /// ```
    pub fn from_reference(raw: &str) -> Self {
        let rest: Vec<&str> = raw.split_whitespace().skip(1).collect();
        Self::normalize(&rest.join(" "))
    }

    /// Normalize a route name.
    pub fn normalize(name: &str) -> Self {
        let lowered = name.to_lowercase().replace('-', " ");
        let collapsed: Vec<&str> = lowered.split_whitespace().collect();
        BaseRoute(collapsed.join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title-cased name for headings, e.g. "Centro Norte".
    pub fn title(&self) -> String {
        self.0
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for BaseRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A direction reference: one concrete outbound-or-return variant of a route
/// that the user can select.
///
/// Two references are the same variant exactly when their raw strings are
/// equal; direction and base route are derived from the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectionRef {
    raw: String,
    direction: Direction,
    base: BaseRoute,
}

impl DirectionRef {
    /// Ingest a raw reference. Returns `None` for empty or blank references.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        Some(Self {
            raw: raw.to_string(),
            direction: Direction::classify(raw),
            base: BaseRoute::from_reference(raw),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn base(&self) -> &BaseRoute {
        &self.base
    }
}

impl fmt::Display for DirectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One scheduled trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureRecord {
    /// "HH:MM" departure label, as published.
    pub label: String,

    /// Direction variant this trip belongs to; `None` when the feed left it
    /// empty.
    pub direction_ref: Option<DirectionRef>,

    /// Stops walked by this trip, in order.
    pub stops: Vec<String>,
}

impl DepartureRecord {
    pub fn new(label: impl Into<String>, direction_ref: &str, stops: Vec<String>) -> Self {
        Self {
            label: label.into(),
            direction_ref: DirectionRef::parse(direction_ref),
            stops,
        }
    }

    /// Departure time in minutes since midnight (0 for malformed labels).
    pub fn minutes(&self) -> u16 {
        to_minutes(&self.label)
    }

    /// Whether this trip belongs to the given direction variant.
    pub fn serves(&self, direction: &DirectionRef) -> bool {
        self.direction_ref.as_ref() == Some(direction)
    }

    /// Whether any stop contains `needle`, which must already be lower-cased.
    pub fn calls_at_lowercase(&self, needle: &str) -> bool {
        self.stops
            .iter()
            .any(|stop| stop.to_lowercase().contains(needle))
    }

    /// Stops joined for display, e.g. "Centro » Norte".
    pub fn route_summary(&self) -> String {
        self.stops.join(" » ")
    }
}
