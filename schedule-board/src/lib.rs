//! Bus departure board.
//!
//! Loads a published timetable, groups each day's departures into routes
//! and their outbound/return variants, and keeps the next departure of the
//! selected direction highlighted as time passes.

pub mod board;
pub mod cache;
pub mod clock;
pub mod domain;
pub mod feed;
pub mod preferences;
pub mod repository;
pub mod session;
