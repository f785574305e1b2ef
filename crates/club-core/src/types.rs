//! Core type definitions with validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pattern every client identifier must match.
static CLIENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z0-9_-]+$").expect("client name pattern is valid"));

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The client identifier is empty or contains characters outside `[a-z0-9_-]`.
    #[error("invalid client name: {value:?}")]
    InvalidClientName { value: String },
}

/// A validated client identifier.
///
/// Client names are lowercase alphanumerics plus `_` and `-`, and order
/// lexicographically (the closure report relies on this).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientName(String);

impl ClientName {
    /// Creates a new name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if !CLIENT_NAME.is_match(&name) {
            return Err(ValidationError::InvalidClientName { value: name });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientName> for String {
    fn from(name: ClientName) -> Self {
        name.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A duration in whole minutes, rendered as `HH:MM` on the wire.
///
/// Unlike billing, this is minutes-derived: 358 minutes is `05:58`, and
/// totals past a day render as-is (`25:01`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ClockTime(i64);

impl ClockTime {
    #[must_use]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes)
    }

    #[must_use]
    pub const fn minutes(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Serde and formatting helpers for `%H:%M` wall-clock fields.
pub mod clock {
    use chrono::NaiveTime;
    use serde::Serializer;

    /// Wall-clock format used throughout the day-log protocol.
    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }
}
