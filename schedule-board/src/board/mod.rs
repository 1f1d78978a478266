//! Schedule resolution and live highlighting.
//!
//! This module holds the logic behind the board: grouping a day's
//! departures into routes and direction variants, narrowing them by stop
//! name, deciding which departure is "next", and keeping that decision
//! current as time passes.
//!
//! Everything except [`HighlightController`] is a pure function of its
//! inputs and safe to recompute at any time.

mod config;
mod filter;
mod group;
mod highlight;
mod nearest;

pub use config::{HighlightConfig, MIN_TICK};
pub use filter::filter_by_stop;
pub use group::{RouteGroup, RouteGroups, group_routes};
pub use highlight::{ControllerState, HighlightController, ScrollTarget};
pub use nearest::{InvalidPolicy, NearestPolicy, resolve_nearest};
