//! Core domain logic for the club day-log replay.
//!
//! This crate contains the fundamental types and logic for:
//! - Venue: the table ledger, client directory, and wait queue state machine
//! - Billing: ceiling-hours charges computed when a table is vacated
//! - Replay: the full-day dispatch loop and report assembly
//!
//! Reading and validating the day-log file is the caller's job; the core
//! consumes validated [`Event`] records in non-decreasing time order.

pub mod billing;
pub mod event;
pub mod replay;
pub mod types;
pub mod venue;

pub use event::{Event, Rejection, ReportLine, code};
pub use replay::{Report, replay};
pub use types::{ClientName, ClockTime, ValidationError};
pub use venue::{ConfigError, Presence, TableSummary, Venue, VenueConfig};
