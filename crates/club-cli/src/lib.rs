//! Club day-log replay CLI library.
//!
//! This crate provides the CLI surface and the day-log file parser; the
//! replay itself lives in `club-core`.

mod cli;
pub mod input;

pub use cli::Cli;
