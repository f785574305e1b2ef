//! Action records and the textual lines a replay emits.

use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;

use crate::types::{ClientName, clock};

/// Action codes of the day-log protocol.
pub mod code {
    /// A client arrives at the club.
    pub const ARRIVE: i32 = 1;
    /// A client takes (or changes to) a specific table.
    pub const SEAT: i32 = 2;
    /// A client starts waiting for a table.
    pub const WAIT: i32 = 3;
    /// A client leaves the club.
    pub const LEAVE: i32 = 4;

    /// Output only: a client is forced out (closing time or full queue).
    pub const FORCED_OUT: i32 = 11;
    /// Output only: a queued client is auto-seated at a freed table.
    pub const PROMOTED: i32 = 12;
    /// Output only: diagnostic for a rejected action.
    pub const REJECTED: i32 = 13;
}

/// A validated action record from the day log.
///
/// The code is kept raw so the dispatcher can diagnose unknown codes
/// instead of the parser treating them as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// When the action happened.
    pub time: NaiveTime,
    /// Action code as it appeared in the log.
    pub code: i32,
    /// The client the action concerns.
    pub client: ClientName,
    /// Remaining argument tokens (the table number for seat actions).
    pub extra: Vec<String>,
}

impl Event {
    #[must_use]
    pub const fn new(time: NaiveTime, code: i32, client: ClientName) -> Self {
        Self {
            time,
            code,
            client,
            extra: Vec::new(),
        }
    }

    /// Appends an argument token (builder-style, used for seat actions).
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra.push(arg.into());
        self
    }

    /// The first extra argument, if any.
    #[must_use]
    pub fn arg(&self) -> Option<&str> {
        self.extra.first().map(String::as_str)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.time.format(clock::FORMAT),
            self.code,
            self.client
        )?;
        for arg in &self.extra {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Reason attached to a code-13 diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Arrival while the client is already inside.
    AlreadyInside,
    /// Arrival outside operating hours.
    NotOpenYet,
    /// Action on a client who never arrived.
    UnknownClient,
    /// Seat request for a table someone else holds.
    TableBusy,
    /// Table argument missing, non-numeric, or out of range.
    BadTableNumber,
    /// Wait request while a table is free.
    NeedlessWait,
    /// Input action code outside the known set.
    BadEventCode,
}

impl Rejection {
    /// The protocol spelling of the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyInside => "YouShallNotPass",
            Self::NotOpenYet => "NotOpenYet",
            Self::UnknownClient => "ClientUnknown",
            Self::TableBusy => "PlaceIsBusy",
            Self::BadTableNumber => "IncorrectTableNumber",
            Self::NeedlessWait => "ICanWaitNoLonger!",
            Self::BadEventCode => "IncorrectEventID",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of replay output, in the order it must appear in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// Echo of an input action (codes 1 through 4).
    Echo(Event),
    /// Code 11: a client is forced out.
    ForcedOut { time: NaiveTime, client: ClientName },
    /// Code 12: a queued client auto-seated at a freed table.
    Promoted {
        time: NaiveTime,
        client: ClientName,
        table: usize,
    },
    /// Code 13: the preceding action was rejected.
    Rejected { time: NaiveTime, reason: Rejection },
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Echo(event) => write!(f, "{event}"),
            Self::ForcedOut { time, client } => write!(
                f,
                "{} {} {client}",
                time.format(clock::FORMAT),
                code::FORCED_OUT
            ),
            Self::Promoted {
                time,
                client,
                table,
            } => write!(
                f,
                "{} {} {client} {table}",
                time.format(clock::FORMAT),
                code::PROMOTED
            ),
            Self::Rejected { time, reason } => write!(
                f,
                "{} {} {reason}",
                time.format(clock::FORMAT),
                code::REJECTED
            ),
        }
    }
}

impl Serialize for ReportLine {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, clock::FORMAT).unwrap()
    }

    fn name(s: &str) -> ClientName {
        ClientName::new(s).unwrap()
    }

    #[test]
    fn event_display_without_args() {
        let event = Event::new(at("09:41"), code::ARRIVE, name("client1"));
        assert_eq!(event.to_string(), "09:41 1 client1");
    }

    #[test]
    fn event_display_with_table_arg() {
        let event = Event::new(at("09:54"), code::SEAT, name("client1")).with_arg("1");
        assert_eq!(event.to_string(), "09:54 2 client1 1");
    }

    #[test]
    fn rejection_protocol_spellings() {
        assert_eq!(Rejection::AlreadyInside.as_str(), "YouShallNotPass");
        assert_eq!(Rejection::NotOpenYet.as_str(), "NotOpenYet");
        assert_eq!(Rejection::UnknownClient.as_str(), "ClientUnknown");
        assert_eq!(Rejection::TableBusy.as_str(), "PlaceIsBusy");
        assert_eq!(Rejection::BadTableNumber.as_str(), "IncorrectTableNumber");
        assert_eq!(Rejection::NeedlessWait.as_str(), "ICanWaitNoLonger!");
        assert_eq!(Rejection::BadEventCode.as_str(), "IncorrectEventID");
    }

    #[test]
    fn report_line_display_all_variants() {
        let promoted = ReportLine::Promoted {
            time: at("12:33"),
            client: name("client4"),
            table: 1,
        };
        assert_eq!(promoted.to_string(), "12:33 12 client4 1");

        let forced = ReportLine::ForcedOut {
            time: at("19:00"),
            client: name("client3"),
        };
        assert_eq!(forced.to_string(), "19:00 11 client3");

        let rejected = ReportLine::Rejected {
            time: at("08:48"),
            reason: Rejection::NotOpenYet,
        };
        assert_eq!(rejected.to_string(), "08:48 13 NotOpenYet");
    }

    #[test]
    fn report_line_serializes_as_display_string() {
        let line = ReportLine::Rejected {
            time: at("09:52"),
            reason: Rejection::NeedlessWait,
        };
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, "\"09:52 13 ICanWaitNoLonger!\"");
    }
}
